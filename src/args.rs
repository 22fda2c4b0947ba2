use clap::{Parser, ValueEnum};
use spinguard::Persona;

#[derive(Parser, Debug)]
#[command(name = "spinguard")]
#[command(about = "Analyzes a web page for ulterior motives, bias and hidden agendas")]
#[command(version)]
pub struct Args {
    /// URL of the page to analyze
    pub url: String,

    /// Reader persona used to tailor the recommendation
    #[arg(short, long, value_enum, default_value_t = PersonaArg::SelfReader)]
    pub persona: PersonaArg,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// URL for the WebDriver instance (overrides config)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Print the page snapshot only, skipping the model call
    #[arg(long)]
    pub snapshot_only: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PersonaArg {
    #[value(name = "self")]
    SelfReader,
    Child,
    Grandparent,
}

/// Convert from CLI argument persona to internal persona
pub fn convert_persona(arg: PersonaArg) -> Persona {
    match arg {
        PersonaArg::SelfReader => Persona::SelfReader,
        PersonaArg::Child => Persona::Child,
        PersonaArg::Grandparent => Persona::Grandparent,
    }
}
