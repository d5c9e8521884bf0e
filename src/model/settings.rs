use bean_framework::{Bean, Fields};

/// Process-wide settings, filled entirely from literals.
#[derive(Debug, Default)]
pub struct Settings {
    pub service_name: String,
    pub port: u16,
    pub verbose: bool,
    pub sample_rate: f64,
}

impl Bean for Settings {
    fn fields(fields: Fields<Self>) -> Fields<Self> {
        fields
            .literal("service_name", "bean-recipe", |s| &mut s.service_name)
            .literal("port", "8080", |s| &mut s.port)
            .literal("verbose", "false", |s| &mut s.verbose)
            .literal("sample_rate", "0.25", |s| &mut s.sample_rate)
    }
}

impl Settings {
    /// The address the service would bind to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
