/// Cleans up configured ticker symbols: trims, upper-cases and drops blanks.
/// Order is preserved.
pub fn normalize_watchlist(symbols: &[String]) -> Vec<String> {
    symbols.iter().filter_map(|s| normalize_symbol(s)).collect()
}

fn normalize_symbol(symbol: &str) -> Option<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return None;
    }
    Some(symbol.to_uppercase())
}
