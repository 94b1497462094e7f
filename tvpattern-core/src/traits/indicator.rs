//! Indicator outputs

/// Bank of indicator lines addressed by GPIO number
pub trait Indicators {
    /// Drive an indicator; unknown lines are ignored
    fn set(&mut self, line: u8, on: bool);
}

/// Board without indicators
impl Indicators for () {
    fn set(&mut self, _line: u8, _on: bool) {}
}
