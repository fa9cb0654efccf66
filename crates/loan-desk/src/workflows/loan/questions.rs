//! Advisor interview scripts.
//!
//! Each loan product has a fixed, ordered list of questions. Every question carries its own
//! canned answer, so demo answers are looked up by question id rather than by matching prompt
//! text.

use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::LoanType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub explanation: &'static str,
    pub canned_answer: &'static str,
}

/// Ordered interview for one loan product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionScript {
    pub loan_type: LoanType,
    pub questions: &'static [Question],
}

impl QuestionScript {
    pub fn for_loan(loan_type: LoanType) -> Self {
        let questions = match loan_type {
            LoanType::HomeLoan => HOME_LOAN,
            LoanType::PersonalLoan => PERSONAL_LOAN,
            LoanType::BusinessLoan => BUSINESS_LOAN,
        };

        Self {
            loan_type,
            questions,
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&'static Question> {
        let questions: &'static [Question] = self.questions;
        questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        let questions: &'static [Question] = self.questions;
        questions.iter().map(|question| question.id)
    }

    pub fn canned_answers(&self) -> BTreeMap<&'static str, &'static str> {
        self.questions
            .iter()
            .map(|question| (question.id, question.canned_answer))
            .collect()
    }
}

const HOME_LOAN: &[Question] = &[
    Question {
        id: "home-1",
        prompt: "Hi there! Welcome to Standard Chartered Bank. I'm Nisha, your loan advisor today. How are you doing?",
        explanation: "We want to ensure a comfortable and personalized experience for you.",
        canned_answer: "I'm doing well, thank you for asking. I appreciate your warm welcome.",
    },
    Question {
        id: "home-2",
        prompt: "So, what brings you in today? Are you looking to apply for a home loan?",
        explanation: "This helps us understand your specific needs and provide targeted assistance.",
        canned_answer: "Yes, I'm interested in applying for a home loan. I've been saving up for a while and feel ready to take this step.",
    },
    Question {
        id: "home-3",
        prompt: "That's great! Could you tell me a bit about the property you have in mind?",
        explanation: "The property details help us determine the loan amount and eligibility.",
        canned_answer: "I'm looking at a 3-bedroom apartment in a gated community in Whitefield, Bangalore. It's approximately 1,500 sq ft with modern amenities.",
    },
    Question {
        id: "home-4",
        prompt: "Alright, and what's the price range? Are you considering a specific down payment amount?",
        explanation: "The down payment affects your loan amount and EMI calculations.",
        canned_answer: "The property is priced at ₹75,00,000. I'm planning to make a down payment of about 20%, which is ₹15,00,000.",
    },
    Question {
        id: "home-5",
        prompt: "Got it. Now, let's talk about your budget. Do you have a monthly installment range in mind?",
        explanation: "This helps us suggest loan options that fit your monthly budget.",
        canned_answer: "I'd be comfortable with a monthly installment between ₹45,000 to ₹50,000, depending on the interest rate and tenure.",
    },
    Question {
        id: "home-6",
        prompt: "Okay. Could you walk me through your current employment status and income? This helps us understand the best loan options for you.",
        explanation: "Your income is a key factor in determining your loan eligibility and amount.",
        canned_answer: "I'm a Senior Software Engineer at Infosys, with 8 years of experience. My monthly income is ₹1,25,000, and I've been with my current employer for 4 years.",
    },
    Question {
        id: "home-7",
        prompt: "Thanks for that. Have you taken any other loans before, or do you currently have any ongoing debts?",
        explanation: "This helps us assess your overall financial obligations and repayment capacity.",
        canned_answer: "I have a car loan with an EMI of ₹12,000, which will be fully paid off in about 18 months. No other significant debts.",
    },
    Question {
        id: "home-8",
        prompt: "Are you familiar with the different loan plans we offer, or would you like me to walk you through them?",
        explanation: "We offer various home loan products with different features and benefits.",
        canned_answer: "I've done some research, but I'd appreciate if you could explain the different home loan options, especially regarding fixed vs. floating rates and any special schemes for first-time homebuyers.",
    },
    Question {
        id: "home-9",
        prompt: "Perfect. I'll get started on the process. Before we move forward, do you have any questions for me?",
        explanation: "We're here to address any concerns you might have about the home loan process.",
        canned_answer: "Yes, I'd like to know the typical processing time once all documents are submitted, and if there are any pre-payment penalties.",
    },
    Question {
        id: "home-10",
        prompt: "Alright! Let's begin. I'll guide you through every step of the process.",
        explanation: "We'll provide full support throughout your home loan application journey.",
        canned_answer: "Thank you! I'm looking forward to a smooth application process with your guidance.",
    },
];

const PERSONAL_LOAN: &[Question] = &[
    Question {
        id: "personal-1",
        prompt: "Hi! Welcome to Standard Chartered Bank. How can I assist you today?",
        explanation: "We want to understand your financial needs to provide the best assistance.",
        canned_answer: "I'm interested in taking a personal loan for some upcoming expenses.",
    },
    Question {
        id: "personal-2",
        prompt: "Oh, you're interested in a personal loan? That's great! May I ask what you'd like to use the loan for — maybe a vacation, home renovation, or something else?",
        explanation: "Understanding the purpose helps us determine the most appropriate loan type.",
        canned_answer: "I'm planning to renovate my home, specifically the kitchen and bathroom. I've been wanting to do this for a while now.",
    },
    Question {
        id: "personal-3",
        prompt: "What loan amount are you considering, and do you have a repayment period in mind?",
        explanation: "This helps us calculate your monthly EMI and suggest suitable loan options.",
        canned_answer: "I'm looking for a loan of ₹10,00,000, preferably with a 4-year (48 months) repayment period.",
    },
    Question {
        id: "personal-4",
        prompt: "Could you walk me through your current employment status and monthly income?",
        explanation: "Your income details help us assess your repayment capacity.",
        canned_answer: "I'm currently employed as a Marketing Manager at TCS. My monthly income is ₹1,25,000, and I've been with the company for 6 years now.",
    },
    Question {
        id: "personal-5",
        prompt: "Do you have any ongoing loans or debts that we should take into account?",
        explanation: "This helps us calculate your debt-to-income ratio for loan eligibility.",
        canned_answer: "I have a car loan with an EMI of ₹15,000 that has about 2 years left. Other than that, I have no significant debts.",
    },
    Question {
        id: "personal-6",
        prompt: "What is your credit score?",
        explanation: "Your credit score is an important factor in determining your loan eligibility and interest rate.",
        canned_answer: "My current CIBIL score is 760, which I checked last month.",
    },
    Question {
        id: "personal-7",
        prompt: "Have you taken a personal loan with us or any other bank before?",
        explanation: "This helps us understand your loan history and experience.",
        canned_answer: "Yes, I took a personal loan about 5 years ago for my wedding expenses, which I repaid successfully without any defaults.",
    },
    Question {
        id: "personal-8",
        prompt: "Would you prefer a fixed or flexible repayment plan?",
        explanation: "We offer different repayment options to suit your financial situation.",
        canned_answer: "I'd prefer a fixed repayment plan as it helps me budget better with a consistent monthly payment.",
    },
    Question {
        id: "personal-9",
        prompt: "Are you familiar with the interest rates and processing fees, or would you like me to explain them?",
        explanation: "Understanding all costs involved helps you make an informed decision.",
        canned_answer: "I've checked the rates online, but I'd appreciate if you could explain any current promotions or special rates that might apply to my situation.",
    },
    Question {
        id: "personal-10",
        prompt: "Alright, I'll get the process started. Do you have any questions before we proceed?",
        explanation: "We're here to address any concerns you might have about the loan process.",
        canned_answer: "Yes, I'd like to know how quickly the loan can be disbursed after approval and whether there are any pre-payment penalties.",
    },
];

const BUSINESS_LOAN: &[Question] = &[
    Question {
        id: "business-1",
        prompt: "Hello! Welcome to Standard Chartered Bank. Are you here to explore our business loan options?",
        explanation: "This helps us understand your initial interest in our business financing products.",
        canned_answer: "Yes, I'm interested in exploring financing options for my tech business to support our expansion plans.",
    },
    Question {
        id: "business-2",
        prompt: "Could you tell me a bit about your business — what industry you're in and how long you've been operating?",
        explanation: "Understanding your business industry and tenure helps us tailor our loan offerings to your specific needs.",
        canned_answer: "I run a software development company called TechSolutions Pvt Ltd. We specialize in enterprise software solutions and have been operating for 5 years now.",
    },
    Question {
        id: "business-3",
        prompt: "What's the purpose of the loan? Are you planning to expand, purchase equipment, or perhaps manage cash flow?",
        explanation: "This helps us determine the most suitable loan type for your needs.",
        canned_answer: "We're planning to expand our operations by hiring more developers and establishing a new office space to accommodate our growing team.",
    },
    Question {
        id: "business-4",
        prompt: "How much capital are you looking to borrow, and over what period would you like to repay it?",
        explanation: "This helps us calculate the loan amount and tenure that would work best for you.",
        canned_answer: "We're looking to borrow ₹50,00,000 with a repayment period of 5 years to ensure manageable monthly payments.",
    },
    Question {
        id: "business-5",
        prompt: "Can you walk me through your current revenue and any outstanding debts?",
        explanation: "This information helps us assess your repayment capacity and financial health.",
        canned_answer: "Our annual revenue is approximately ₹2.5 crores with a consistent growth rate of 20% year-on-year. We have a small equipment loan of ₹5,00,000 that will be fully paid off within 6 months.",
    },
    Question {
        id: "business-6",
        prompt: "Do you have any collateral in mind to secure the loan, or would you prefer an unsecured option?",
        explanation: "Secured loans typically offer better interest rates but require collateral.",
        canned_answer: "Yes, we can offer our office property and equipment as collateral for the loan. We're open to discussing the valuation process.",
    },
    Question {
        id: "business-7",
        prompt: "Have you taken a business loan with us or any other institution before?",
        explanation: "Your loan history helps us understand your experience with business financing.",
        canned_answer: "Yes, we took a smaller business loan (₹10,00,000) three years ago for purchasing equipment, which we repaid ahead of schedule.",
    },
    Question {
        id: "business-8",
        prompt: "What made you choose Standard Chartered Bank for your business financing?",
        explanation: "We'd like to understand what aspects of our service appeal to you.",
        canned_answer: "Standard Chartered has a strong reputation for supporting growing businesses, and your competitive interest rates and business-friendly policies made you our first choice.",
    },
    Question {
        id: "business-9",
        prompt: "What are your growth plans for next 5 years?",
        explanation: "Understanding your long-term plans helps us structure suitable financing solutions.",
        canned_answer: "We aim to double our team size, expand to international markets starting with Singapore, and launch a SaaS product line that should increase our revenue by at least 40% annually.",
    },
    Question {
        id: "business-10",
        prompt: "Would you like me to go over the different repayment options and interest rates we offer?",
        explanation: "We can explain our flexible repayment options suited to your business cash flow.",
        canned_answer: "Yes, please. I'd particularly like to understand any flexible repayment options that might align with our business's seasonal cash flow.",
    },
    Question {
        id: "business-11",
        prompt: "Alright, let's move forward. Do you have any questions for me before we begin the application process?",
        explanation: "We're here to address any concerns or questions you might have.",
        canned_answer: "Yes, I'd like to know what documentation we'll need to provide and how long the approval process typically takes for a loan of this size.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scripts_have_expected_lengths() {
        assert_eq!(QuestionScript::for_loan(LoanType::HomeLoan).len(), 10);
        assert_eq!(QuestionScript::for_loan(LoanType::PersonalLoan).len(), 10);
        assert_eq!(QuestionScript::for_loan(LoanType::BusinessLoan).len(), 11);
    }

    #[test]
    fn ids_are_unique_and_prefixed_by_product() {
        for loan_type in LoanType::ALL {
            let script = QuestionScript::for_loan(loan_type);
            let prefix = loan_type.slug().trim_end_matches("-loan");
            let ids: HashSet<_> = script.ids().collect();

            assert_eq!(ids.len(), script.len());
            assert!(script.ids().all(|id| id.starts_with(prefix)));
            assert!(script
                .questions
                .iter()
                .all(|question| !question.canned_answer.is_empty()));
        }
    }

    #[test]
    fn lookup_is_keyed_by_id() {
        let script = QuestionScript::for_loan(LoanType::PersonalLoan);
        let question = script.lookup("personal-6").expect("credit score question");
        assert_eq!(question.prompt, "What is your credit score?");
        assert_eq!(
            script.canned_answers().get("personal-6"),
            Some(&"My current CIBIL score is 760, which I checked last month.")
        );
        assert!(script.lookup("home-6").is_none());
    }
}
