/// Which source resolves a request. Chosen fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy<'a> {
    Remote { credential: &'a str },
    Fallback,
}

pub fn select_strategy(credential: Option<&str>) -> Strategy<'_> {
    match credential {
        Some(c) if !c.trim().is_empty() => Strategy::Remote { credential: c },
        _ => Strategy::Fallback,
    }
}
