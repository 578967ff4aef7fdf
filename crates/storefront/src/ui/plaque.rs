//! Hero plaque fit check.
//!
//! The about/shop hero prints its title on a wooden plaque image. When the
//! text overflows the plaque (long translations, narrow screens) the hero
//! switches to a fallback layout.

/// Minimum plaque width before the check applies.
const MIN_PLAQUE_WIDTH: f64 = 80.0;
/// Minimum plaque height before the check applies.
const MIN_PLAQUE_HEIGHT: f64 = 50.0;
/// Inset the title and subtitle must keep from the plaque edge.
const TEXT_INSET: f64 = 10.0;
/// Inset for the brand line, which sits closer to the edge.
const BRAND_INSET: f64 = 6.0;

/// A client rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether `inner` lies inside `self` shrunk by `inset` on every side.
    #[must_use]
    pub fn contains_inset(&self, inner: &Self, inset: f64) -> bool {
        inner.left >= self.left + inset
            && inner.right <= self.right - inset
            && inner.top >= self.top + inset
            && inner.bottom <= self.bottom - inset
    }
}

/// Layout of an element as measured on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measured {
    pub rect: Rect,
    /// False for `display: none`, `visibility: hidden` or zero opacity.
    pub visible: bool,
}

/// Elements inside the hero; absent ones are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroLayout {
    pub plaque: Measured,
    pub title: Option<Measured>,
    pub subtitle: Option<Measured>,
    pub brand: Option<Measured>,
}

/// Whether the hero should switch to its fallback layout.
///
/// A hidden or tiny plaque never triggers the fallback. Absent or hidden
/// text elements count as fitting.
#[must_use]
pub fn needs_fallback(layout: &HeroLayout) -> bool {
    let plaque = layout.plaque;
    if !plaque.visible
        || plaque.rect.width() < MIN_PLAQUE_WIDTH
        || plaque.rect.height() < MIN_PLAQUE_HEIGHT
    {
        return false;
    }

    let fits = |el: Option<Measured>, inset: f64| {
        el.is_none_or(|m| !m.visible || plaque.rect.contains_inset(&m.rect, inset))
    };

    !(fits(layout.title, TEXT_INSET)
        && fits(layout.subtitle, TEXT_INSET)
        && fits(layout.brand, BRAND_INSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(rect: Rect) -> Measured {
        Measured {
            rect,
            visible: true,
        }
    }

    fn layout(title: Rect) -> HeroLayout {
        HeroLayout {
            plaque: shown(Rect::new(0.0, 0.0, 400.0, 200.0)),
            title: Some(shown(title)),
            subtitle: None,
            brand: Some(shown(Rect::new(6.0, 150.0, 388.0, 20.0))),
        }
    }

    #[test]
    fn test_text_inside_plaque_fits() {
        assert!(!needs_fallback(&layout(Rect::new(10.0, 10.0, 380.0, 60.0))));
    }

    #[test]
    fn test_overflowing_title_falls_back() {
        assert!(needs_fallback(&layout(Rect::new(5.0, 10.0, 380.0, 60.0))));
        assert!(needs_fallback(&layout(Rect::new(10.0, 10.0, 420.0, 60.0))));
    }

    #[test]
    fn test_hidden_title_fits() {
        let mut hero = layout(Rect::new(-50.0, 0.0, 600.0, 60.0));
        hero.title = hero.title.map(|m| Measured { visible: false, ..m });
        assert!(!needs_fallback(&hero));
    }

    #[test]
    fn test_tiny_or_hidden_plaque_never_falls_back() {
        let mut hero = layout(Rect::new(-50.0, 0.0, 600.0, 60.0));
        hero.plaque = shown(Rect::new(0.0, 0.0, 79.0, 200.0));
        assert!(!needs_fallback(&hero));

        hero.plaque = Measured {
            rect: Rect::new(0.0, 0.0, 400.0, 200.0),
            visible: false,
        };
        assert!(!needs_fallback(&hero));
    }
}
