use reqwest;

/// Blocking GET returning the response body as text. Non-success status
/// codes are reported as errors so a dead feed surfaces instead of being
/// parsed as an empty sheet.
pub fn get(url: &str) -> Result<String, reqwest::Error> {
    Ok(reqwest::get(url)?.error_for_status()?.text()?)
}
