//! Visitor preferences: language and analytics consent.

use ramstuga_core::Language;
use ramstuga_storefront::consent::{Consent, ConsentBanner};
use ramstuga_storefront::i18n;

use super::{CliError, Session};

/// Show or remember the preferred language.
///
/// # Errors
///
/// Returns an error for an unknown language code.
pub fn lang(session: &Session, code: Option<&str>) -> Result<(), CliError> {
    match code {
        Some(code) => {
            let language = Language::from_code(code)
                .ok_or_else(|| CliError::InvalidArgument(format!("unknown language '{code}'")))?;
            i18n::remember_language(&session.store, language);
            println!("{}", language.code());
        }
        None => {
            let language = i18n::stored_language(&session.store).unwrap_or_default();
            println!("{}", language.code());
        }
    }
    Ok(())
}

/// What to do with analytics consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConsentAction {
    Show,
    Accept,
    Decline,
}

/// Show or record the analytics consent choice.
pub fn consent(session: &Session, action: ConsentAction) {
    match action {
        ConsentAction::Accept => ConsentBanner::accept(&session.store),
        ConsentAction::Decline => ConsentBanner::decline(&session.store),
        ConsentAction::Show => {
            if let Some(banner) = ConsentBanner::pending(&session.store, session.language) {
                println!("{} [{} / {}]", banner.message, banner.accept, banner.decline);
                return;
            }
        }
    }

    let state = match Consent::load(&session.store) {
        Consent::Granted => "granted",
        Consent::Denied => "denied",
        Consent::Unset => "unset",
    };
    println!("{state}");
}
