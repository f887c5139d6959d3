use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "PORT", default = "9000")]
    pub port: u16,

    /// `EnvFilter` directives, e.g. `info` or `conventions_core=debug`.
    #[envconfig(from = "CONVENTIONS_LOG", default = "info")]
    pub log: String,
}
