use serde::{Deserialize, Serialize};

/// Prefix stamped on every application reference issued by the desk.
pub const APPLICATION_PREFIX: &str = "SC";

/// Exclusive upper bound of the numeric suffix of an application id.
///
/// Serials wrap to zero at this bound, and ids only carry initials, so two applicants with the
/// same initials can be issued the same id once the counter has wrapped (or after a restart
/// against a repository that outlives the counter). Ids are unique only up to what the
/// repository reports as a conflict.
pub const APPLICATION_SERIAL_LIMIT: u32 = 1_000_000;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    /// Build `SC<initials><serial:06>` where the initials are the uppercased first letter of each
    /// whitespace-separated token of the applicant's name.
    ///
    /// Callers must keep `serial` below [`APPLICATION_SERIAL_LIMIT`]; larger values would widen
    /// the numeric suffix past six digits.
    pub fn for_applicant(applicant_name: Option<&str>, serial: u32) -> Self {
        let initials: String = applicant_name
            .map(|name| {
                name.split_whitespace()
                    .filter_map(|token| token.chars().next())
                    .flat_map(char::to_uppercase)
                    .collect()
            })
            .unwrap_or_default();

        Self(format!("{APPLICATION_PREFIX}{initials}{serial:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Loan products offered through the branch manager flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanType {
    HomeLoan,
    PersonalLoan,
    BusinessLoan,
}

impl LoanType {
    pub const ALL: [LoanType; 3] = [
        LoanType::HomeLoan,
        LoanType::PersonalLoan,
        LoanType::BusinessLoan,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "home-loan" | "home" => Some(Self::HomeLoan),
            "personal-loan" | "personal" => Some(Self::PersonalLoan),
            "business-loan" | "business" => Some(Self::BusinessLoan),
            _ => None,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            LoanType::HomeLoan => "home-loan",
            LoanType::PersonalLoan => "personal-loan",
            LoanType::BusinessLoan => "business-loan",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LoanType::HomeLoan => "Home Loan",
            LoanType::PersonalLoan => "Personal Loan",
            LoanType::BusinessLoan => "Business Loan",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            LoanType::HomeLoan => "Home Loan Application",
            LoanType::PersonalLoan => "Personal Loan Application",
            LoanType::BusinessLoan => "Business Loan Application",
        }
    }

    /// Advisor introduction clip played before the question script.
    pub const fn intro_video(self) -> &'static str {
        match self {
            LoanType::HomeLoan => "Home_loan.mp4",
            LoanType::PersonalLoan => "Personal_loan.mp4",
            LoanType::BusinessLoan => "business_loan.mp4",
        }
    }
}

/// Languages offered on the applicant details screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "kn")]
    Kannada,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::English,
        Locale::Hindi,
        Locale::Tamil,
        Locale::Telugu,
        Locale::Bengali,
        Locale::Kannada,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    pub const fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Hindi => "hi",
            Locale::Tamil => "ta",
            Locale::Telugu => "te",
            Locale::Bengali => "bn",
            Locale::Kannada => "kn",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Hindi => "Hindi",
            Locale::Tamil => "Tamil",
            Locale::Telugu => "Telugu",
            Locale::Bengali => "Bengali",
            Locale::Kannada => "Kannada",
        }
    }
}

/// Contact details captured before the interview starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    #[serde(default)]
    pub language: Locale,
}

impl ApplicantProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.full_name.trim().is_empty() {
            return Err(ProfileError::MissingName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ProfileError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(ProfileError::InvalidEmail(email.to_string()));
        }

        let mobile = self.mobile.trim();
        if mobile.is_empty() {
            return Err(ProfileError::MissingMobile);
        }
        if mobile.len() != 10 || !mobile.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ProfileError::InvalidMobile(mobile.to_string()));
        }

        Ok(())
    }

    /// First token of the name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or_default()
    }
}

// `local@domain.tld`: no whitespace, a single `@`, and a dot with text on both sides in the domain.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .rsplit_once('.')
        .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
        .unwrap_or(false)
}

/// Validation failures for applicant contact details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("full name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("mobile number is required")]
    MissingMobile,
    #[error("'{0}' is not a valid 10-digit mobile number")]
    InvalidMobile(String),
}

/// Lifecycle of a decision as seen by the application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Pending,
    Approved,
    Rejected,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStatus::Pending => "pending",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
        }
    }
}

/// Scalar inputs consumed by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecisionInput {
    pub credit_score: u16,
    pub requested_amount_lakhs: f64,
    pub tenure_years: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
}

/// Immutable decision record produced once per application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub application_id: ApplicationId,
    pub status: DecisionStatus,
    pub tier: super::decision::CreditTier,
    pub credit_score: u16,
    pub interest_rate_percent: f64,
    pub principal: u64,
    pub tenure_months: u32,
    pub monthly_installment: u64,
    pub total_repayment: u64,
    pub total_interest: u64,
    pub reasons: Vec<String>,
    pub next_steps: Vec<String>,
}

impl LoanDecision {
    pub fn is_approved(&self) -> bool {
        self.status == DecisionStatus::Approved
    }

    /// One-line summary suitable for logs and status views.
    pub fn summary(&self) -> String {
        match self.status {
            DecisionStatus::Approved => format!(
                "approved at {:.1}% with EMI of {} over {} months",
                self.interest_rate_percent, self.monthly_installment, self.tenure_months
            ),
            DecisionStatus::Rejected => match self.reasons.first() {
                Some(reason) => format!("rejected: {reason}"),
                None => "rejected".to_string(),
            },
            DecisionStatus::Pending => "pending evaluation".to_string(),
        }
    }
}
