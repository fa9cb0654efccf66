use crate::infra::{parse_loan_type, InMemoryApplicationRepository};
use clap::Args;
use loan_desk::config::AppConfig;
use loan_desk::error::AppError;
use loan_desk::workflows::loan::{
    ApplicantProfile, ApplicationRecord, CannedScanner, DecisionConfig, DecisionEngine,
    FaceCheck, LoanApplicationRequest, LoanApplicationService, LoanDecision, LoanDecisionInput,
    LoanType, Locale, QuestionScript, SimulatedBureau,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// CIBIL score between 300 and 900
    #[arg(long)]
    pub(crate) credit_score: u16,
    /// Requested amount in lakhs
    #[arg(long)]
    pub(crate) amount_lakhs: f64,
    /// Repayment tenure in years
    #[arg(long)]
    pub(crate) tenure_years: u16,
    /// Applicant name used for the application id initials
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Serial stamped into the application id
    #[arg(long, default_value_t = 1)]
    pub(crate) serial: u32,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Loan product: home, personal, or business
    #[arg(long, value_parser = parse_loan_type, default_value = "home-loan")]
    pub(crate) loan_type: LoanType,
    /// Also print the scripted demo answers
    #[arg(long)]
    pub(crate) with_answers: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Loan product: home, personal, or business
    #[arg(long, value_parser = parse_loan_type, default_value = "home-loan")]
    pub(crate) loan_type: LoanType,
    /// Seed for the simulated bureau. Falls back to LOAN_SCORE_SEED, then entropy.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Applicant name
    #[arg(long, default_value = "Jane Doe")]
    pub(crate) name: String,
    /// Requested amount in lakhs
    #[arg(long, default_value_t = 25.0)]
    pub(crate) amount_lakhs: f64,
    /// Repayment tenure in years
    #[arg(long, default_value_t = 10)]
    pub(crate) tenure_years: u16,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        credit_score,
        amount_lakhs,
        tenure_years,
        name,
        serial,
    } = args;

    let config = DecisionConfig::default();
    config.validate()?;
    let engine = DecisionEngine::new(config);
    let decision = engine.evaluate(
        &LoanDecisionInput {
            credit_score,
            requested_amount_lakhs: amount_lakhs,
            tenure_years,
            applicant_name: name,
        },
        serial,
    )?;

    render_decision(&decision);
    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let script = QuestionScript::for_loan(args.loan_type);

    println!("{} interview ({} questions)", args.loan_type.title(), script.len());
    for (index, question) in script.questions.iter().enumerate() {
        println!("\n{}. {}", index + 1, question.prompt);
        println!("   {}", question.explanation);
        if args.with_answers {
            println!("   Demo answer: {}", question.canned_answer);
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        loan_type,
        seed,
        name,
        amount_lakhs,
        tenure_years,
    } = args;

    let mut scoring = AppConfig::load()?.scoring;
    if seed.is_some() {
        scoring.seed = seed;
    }

    let decision_config = DecisionConfig::default();
    decision_config.validate()?;
    let service = LoanApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(SimulatedBureau::from_config(&scoring)),
        decision_config,
    )
    .with_extractor(Arc::new(CannedScanner));

    let request = demo_request(loan_type, &name, amount_lakhs, tenure_years);

    println!("AI branch manager demo: {}", loan_type.title());
    println!("Intro video: {}", loan_type.intro_video());
    println!(
        "Welcome, {}. Interview language: {}",
        request.applicant.first_name(),
        request.applicant.language.display_name()
    );

    let wizard = service.prepare(&request)?;
    println!("\nIdentity documents (canned scanner)");
    for evidence in wizard.documents() {
        println!("  {:<8} {}", evidence.kind.label(), evidence.number);
    }
    println!(
        "\nInterview: {} questions answered with scripted answers",
        wizard.answers().len()
    );

    let record = service.submit(request)?;
    render_record(&record);
    Ok(())
}

fn demo_request(
    loan_type: LoanType,
    name: &str,
    amount_lakhs: f64,
    tenure_years: u16,
) -> LoanApplicationRequest {
    let mut handle: String = name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    if handle.is_empty() {
        handle = "applicant".to_string();
    }

    LoanApplicationRequest {
        loan_type,
        applicant: ApplicantProfile {
            full_name: name.to_string(),
            email: format!("{handle}@example.com"),
            mobile: "9876543210".to_string(),
            language: Locale::English,
        },
        requested_amount_lakhs: amount_lakhs,
        tenure_years,
        credit_score: None,
        face_check: FaceCheck::Matched,
        documents: Vec::new(),
        answers: Default::default(),
        use_canned_answers: true,
    }
}

fn render_record(record: &ApplicationRecord) {
    println!("\nApplication {}", record.application_id.as_str());
    println!("  Status: {}", record.status.label());
    println!("  Summary: {}", record.decision_summary());
    if let Some(decision) = &record.decision {
        render_decision(decision);
    }
}

fn render_decision(decision: &LoanDecision) {
    println!("\nLoan decision for {}", decision.application_id.as_str());
    println!(
        "  Credit score: {} ({})",
        decision.credit_score,
        decision.tier.label()
    );
    println!("  Outcome: {}", decision.status.label());
    println!("  Interest rate: {:.1}%", decision.interest_rate_percent);
    println!(
        "  Principal: Rs {} over {} months",
        decision.principal, decision.tenure_months
    );
    println!("  Monthly EMI: Rs {}", decision.monthly_installment);
    println!(
        "  Total repayment: Rs {} (interest Rs {})",
        decision.total_repayment, decision.total_interest
    );

    println!("\nReasons");
    for reason in &decision.reasons {
        println!("- {}", reason);
    }
    println!("\nNext steps");
    for step in &decision.next_steps {
        println!("- {}", step);
    }
}
