use crate::demo::{run_decide, run_demo, run_questions, DecideArgs, DemoArgs, QuestionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "AI Branch Manager Loan Desk",
    about = "Run the loan desk service or walk through a loan decision from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single loan decision and print the quote
    Decide(DecideArgs),
    /// Print the advisor interview for a loan product
    Questions(QuestionsArgs),
    /// Walk the guided application end to end with canned answers
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decide(args) => run_decide(args),
        Command::Questions(args) => run_questions(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_desk::workflows::loan::LoanType;

    #[test]
    fn missing_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["loan-desk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn decide_arguments_parse() {
        let cli = Cli::try_parse_from([
            "loan-desk-api",
            "decide",
            "--credit-score",
            "800",
            "--amount-lakhs",
            "25",
            "--tenure-years",
            "10",
            "--name",
            "Jane Doe",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Decide(args)) => {
                assert_eq!(args.credit_score, 800);
                assert_eq!(args.amount_lakhs, 25.0);
                assert_eq!(args.tenure_years, 10);
                assert_eq!(args.name.as_deref(), Some("Jane Doe"));
            }
            other => panic!("expected decide command, got {other:?}"),
        }
    }

    #[test]
    fn demo_rejects_unknown_loan_types() {
        assert!(Cli::try_parse_from(["loan-desk-api", "demo", "--loan-type", "gold"]).is_err());

        let cli = Cli::try_parse_from(["loan-desk-api", "demo", "--loan-type", "business"])
            .expect("parses");
        match cli.command {
            Some(Command::Demo(args)) => assert_eq!(args.loan_type, LoanType::BusinessLoan),
            other => panic!("expected demo command, got {other:?}"),
        }
    }
}
