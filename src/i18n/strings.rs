use crate::i18n::Locale;

/// Localized copy for the contact section of the landing page.
///
/// `project_types` and `budget_ranges` are the fixed option lists offered by
/// the form; the selected label is relayed verbatim in the email.
#[derive(Debug, Clone)]
pub struct ContactStrings {
    // ==================== Section Copy ====================
    pub eyebrow: &'static str,
    pub headline: &'static str,
    pub description: &'static str,

    // ==================== Form Labels ====================
    pub name_label: &'static str,
    pub email_label: &'static str,
    pub company_label: &'static str,
    pub project_type_label: &'static str,
    pub project_types: &'static [&'static str],
    pub budget_label: &'static str,
    pub budget_ranges: &'static [&'static str],
    pub message_label: &'static str,

    // ==================== Submit Button ====================
    /// Label while the form is idle
    pub submit: &'static str,

    /// Label while a submission is in flight
    pub sending: &'static str,

    // ==================== Outcome Messages ====================
    pub success_title: &'static str,
    pub success_description: &'static str,

    /// Single generic, retryable error shown for every failure kind
    pub error: &'static str,
}

const BUDGET_RANGES: &[&str] = &["< €25k", "€25k - €50k", "€50k - €100k", "€100k+"];

static ENGLISH: ContactStrings = ContactStrings {
    eyebrow: "Start a Project",
    headline: "Let's build something extraordinary",
    description: "Share your vision with us. We'll respond within 24 hours with an initial assessment and next steps.",
    name_label: "Name",
    email_label: "Email",
    company_label: "Company (optional)",
    project_type_label: "Project Type",
    project_types: &[
        "Web Development",
        "Mobile App",
        "Custom Software",
        "AI Solution",
        "Consulting",
        "Other",
    ],
    budget_label: "Budget Range",
    budget_ranges: BUDGET_RANGES,
    message_label: "Tell us about your project",
    submit: "Send Message",
    sending: "Sending...",
    success_title: "Message Received",
    success_description: "Thank you for reaching out. We'll review your project and get back to you within 24 hours.",
    error: "An error occurred. Please try again later.",
};

static ITALIAN: ContactStrings = ContactStrings {
    eyebrow: "Inizia un Progetto",
    headline: "Costruiamo qualcosa di straordinario",
    description: "Condividi con noi la tua visione. Ti risponderemo entro 24 ore con una prima valutazione e i prossimi passi.",
    name_label: "Nome",
    email_label: "Email",
    company_label: "Azienda (opzionale)",
    project_type_label: "Tipo di Progetto",
    project_types: &[
        "Sviluppo Web",
        "App Mobile",
        "Software Custom",
        "Soluzione AI",
        "Consulenza",
        "Altro",
    ],
    budget_label: "Budget Indicativo",
    budget_ranges: BUDGET_RANGES,
    message_label: "Raccontaci il tuo progetto",
    submit: "Invia Messaggio",
    sending: "Invio in corso...",
    success_title: "Messaggio Ricevuto",
    success_description: "Grazie per averci contattato. Analizzeremo il tuo progetto e ti risponderemo entro 24 ore.",
    error: "Si è verificato un errore. Riprova più tardi.",
};

impl ContactStrings {
    pub fn for_locale(locale: Locale) -> &'static ContactStrings {
        match locale {
            Locale::English => &ENGLISH,
            Locale::Italian => &ITALIAN,
        }
    }

    /// Whether `label` is one of the project types offered in any locale.
    pub fn is_known_project_type(label: &str) -> bool {
        Locale::ALL
            .iter()
            .any(|l| Self::for_locale(*l).project_types.contains(&label))
    }

    /// Whether `range` is one of the budget ranges offered in any locale.
    pub fn is_known_budget_range(range: &str) -> bool {
        Locale::ALL
            .iter()
            .any(|l| Self::for_locale(*l).budget_ranges.contains(&range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_fields(s: &ContactStrings) -> Vec<&'static str> {
        vec![
            s.eyebrow,
            s.headline,
            s.description,
            s.name_label,
            s.email_label,
            s.company_label,
            s.project_type_label,
            s.budget_label,
            s.message_label,
            s.submit,
            s.sending,
            s.success_title,
            s.success_description,
            s.error,
        ]
    }

    #[test]
    fn test_no_empty_strings() {
        for locale in Locale::ALL {
            let strings = ContactStrings::for_locale(locale);
            for field in all_fields(strings) {
                assert!(!field.is_empty(), "Empty string in {} locale", locale);
            }
        }
    }

    #[test]
    fn test_option_lists_have_same_shape() {
        let en = ContactStrings::for_locale(Locale::English);
        let it = ContactStrings::for_locale(Locale::Italian);
        assert_eq!(en.project_types.len(), 6);
        assert_eq!(en.project_types.len(), it.project_types.len());
        assert_eq!(en.budget_ranges, it.budget_ranges);
    }

    #[test]
    fn test_italian_strings_are_translated() {
        let en = ContactStrings::for_locale(Locale::English);
        let it = ContactStrings::for_locale(Locale::Italian);
        assert_ne!(en.submit, it.submit);
        assert_ne!(en.error, it.error);
        assert_eq!(it.project_types[0], "Sviluppo Web");
    }

    #[test]
    fn test_known_labels() {
        assert!(ContactStrings::is_known_project_type("AI Solution"));
        assert!(ContactStrings::is_known_project_type("Consulenza"));
        assert!(!ContactStrings::is_known_project_type("Blockchain"));
        assert!(ContactStrings::is_known_budget_range("€100k+"));
        assert!(!ContactStrings::is_known_budget_range("free"));
    }
}
