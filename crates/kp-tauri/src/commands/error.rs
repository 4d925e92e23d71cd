/// Centralized error mapping for commands.
///
/// Every command returns `Result<T, String>`; this is the single place
/// errors become the string the page sees.
pub fn map_err(err: anyhow::Error) -> String {
    format!("{err:#}")
}
