//! Checkout commands: shipping region, payment reference, payment link and
//! order mail.

use ramstuga_storefront::pricing::ShippingRegion;

use super::Session;
use super::cart::print_summary;

/// Show or change the shipping region.
pub fn ship(session: &Session, region: Option<ShippingRegion>) {
    let mut cart = session.controller();
    if let Some(region) = region {
        cart.set_shipping_region(region);
    }
    println!(
        "Shipping to {} ({})",
        cart.shipping_region().label(session.language),
        cart.shipping_region()
    );
    print_summary(&cart);
}

/// Print today's payment reference, optionally via the copy action.
pub fn reference(session: &Session, copy: bool) {
    let mut cart = session.controller();
    if copy {
        cart.copy_reference();
    } else {
        println!("{}", cart.payment_reference());
    }
}

/// Print the payment link and, on request, the order mail link.
pub fn checkout(session: &Session, mail: bool) {
    let mut cart = session.controller();
    cart.init();
    let link = cart.click_payment_link();
    println!("{link}");

    if mail {
        if let Some(mailto) = cart.paid_mail() {
            println!("{mailto}");
        }
    }
}
