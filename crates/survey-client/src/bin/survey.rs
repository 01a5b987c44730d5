//! survey: fill in and submit the want-survey from the command line.

use std::process::ExitCode;

use clap::Parser;
use survey_client::{Field, FormState, HttpTransport, SurveyForm};
use survey_core::defaults;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "survey")]
#[command(author, version, about = "Tell us what you want and why it matters")]
struct Cli {
    /// Describe what you want (at least 8 characters)
    #[arg(short, long)]
    want: String,

    /// Why does this matter?
    #[arg(long, default_value = "")]
    why: String,

    /// Category
    #[arg(short, long, default_value = defaults::CATEGORIES[0])]
    category: String,

    /// Urgency (ASAP, Soon, Sometime, Just exploring)
    #[arg(short, long, default_value = defaults::FORM_URGENCY)]
    urgency: String,

    /// Budget (Free, $, $$, $$$, Not sure)
    #[arg(short, long, default_value = defaults::FORM_BUDGET)]
    budget: String,

    /// Tags, comma separated
    #[arg(short, long, default_value = "")]
    tags: String,

    /// Your name
    #[arg(short, long, default_value = "")]
    name: String,

    /// Your email
    #[arg(short, long, default_value = "")]
    email: String,

    /// I agree to share this information for research and product design purposes
    #[arg(long)]
    consent: bool,

    /// Survey server base URL
    #[arg(short, long, env = "SURVEY_SERVER", default_value = "http://localhost:3000")]
    server: String,
}

impl Cli {
    fn form_state(&self) -> FormState {
        let mut state = FormState::default();
        state.set(Field::Want, self.want.as_str());
        state.set(Field::Why, self.why.as_str());
        state.set(Field::Category, self.category.as_str());
        state.set(Field::Urgency, self.urgency.as_str());
        state.set(Field::Budget, self.budget.as_str());
        state.set(Field::Tags, self.tags.as_str());
        state.set(Field::Name, self.name.as_str());
        state.set(Field::Email, self.email.as_str());
        state.set_consent(self.consent);
        state
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let transport = match HttpTransport::new(&cli.server) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut form = SurveyForm::with_state(transport, cli.form_state());
    eprintln!("{}", form.state().want_counter());

    match form.submit().await {
        Ok(()) => {
            println!("Thank you! Your response has been recorded.");
            if let Some(copy) = form.copy_json() {
                println!("{}", copy);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
