/// A service region the scraper walks through.
///
/// `zip` is kept as a string so leading zeros ("02108") survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub state: &'static str,
    pub zip: &'static str,
    pub utility: &'static str,
}
