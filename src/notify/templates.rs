//! The two fixed message templates, with submission fields interpolated.

use crate::domain::SubmissionInput;

/// Renders the confirmation sent to the submitter: a thank-you plus a
/// request for call availability. Returns `(subject, body)`.
#[must_use]
pub fn confirmation(input: &SubmissionInput) -> (String, String) {
    let subject = "Thank you for requesting pilot access - Let's schedule a call".to_string();
    let body = format!(
        "Hi there,\n\
         \n\
         Thank you for your interest in Sprinttern!\n\
         \n\
         We've received your request for pilot access. We're excited about helping {company} with {task}.\n\
         \n\
         To move forward, we'd love to schedule a quick call to discuss your needs in more detail and answer any questions you might have.\n\
         \n\
         Could you please let us know what times you're free for a call? Please reply to this email with:\n\
         - Your preferred days of the week\n\
         - Your preferred times (and timezone)\n\
         - Any days/times that don't work for you\n\
         \n\
         We'll coordinate a time that works for both of us.\n\
         \n\
         Looking forward to speaking with you!\n\
         \n\
         Best regards,\n\
         The FirstTask Team\n",
        company = input.company_name,
        task = input.task_description,
    );
    (subject, body)
}

/// Renders the new-submission alert sent to the business owner, listing
/// every submitted field. Returns `(subject, body)`.
#[must_use]
pub fn owner_alert(input: &SubmissionInput) -> (String, String) {
    let subject = format!("New Pilot Access Request - {}", input.company_name);
    let body = format!(
        "New form submission received:\n\
         \n\
         Company Name: {company}\n\
         Role: {role}\n\
         Email: {email}\n\
         Website/LinkedIn: {website}\n\
         \n\
         Task Description:\n\
         {task}\n\
         \n\
         Timeline: {timeline}\n\
         Budget Range: {budget}\n\
         \n\
         ---\n\
         You can reply directly to {email} to follow up.\n",
        company = input.company_name,
        role = input.role,
        email = input.email,
        website = input.website.as_deref().unwrap_or("N/A"),
        task = input.task_description,
        timeline = input.timeline,
        budget = input.budget,
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> SubmissionInput {
        SubmissionInput {
            company_name: "Acme".to_string(),
            role: "CEO".to_string(),
            email: "a@acme.com".to_string(),
            website: None,
            task_description: "build a widget".to_string(),
            timeline: "2 weeks".to_string(),
            budget: "$5k".to_string(),
        }
    }

    #[test]
    fn confirmation_mentions_company_and_task() {
        let (subject, body) = confirmation(&sample_input());
        assert!(subject.contains("pilot access"));
        assert!(body.contains("Acme"));
        assert!(body.contains("build a widget"));
    }

    #[test]
    fn owner_alert_lists_all_fields() {
        let (subject, body) = owner_alert(&sample_input());
        assert_eq!(subject, "New Pilot Access Request - Acme");
        for fragment in ["CEO", "a@acme.com", "build a widget", "2 weeks", "$5k"] {
            assert!(body.contains(fragment), "missing {fragment}");
        }
        // Absent website renders as N/A.
        assert!(body.contains("Website/LinkedIn: N/A"));
    }
}
