#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Auto-rotate through games every 7s. On by default; SCOREBOX_AUTOROTATE=0 disables.
    pub autorotate: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { autorotate: true }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let autorotate = std::env::var("SCOREBOX_AUTOROTATE")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { autorotate }
    }
}
