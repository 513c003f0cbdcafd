//! Prompt construction and post-processing for cover letters

use regex::Regex;
use std::sync::OnceLock;

pub const RESUME_PROMPT_CHARS: usize = 2000;
pub const JOB_PROMPT_CHARS: usize = 1500;

pub const COMPANY_PLACEHOLDER: &str = "[Company Name]";
pub const POSITION_PLACEHOLDER: &str = "[Position Title]";

const CLOSINGS: [&str; 3] = ["sincerely", "best regards", "thank you"];

pub const SYSTEM_PROMPT: &str = r#"You are an expert career coach and professional writer specializing in creating compelling, ATS-friendly cover letters. Your goal is to help job seekers stand out while ensuring their cover letters pass through Applicant Tracking Systems.

Guidelines for writing cover letters:
1. Keep it concise (250-400 words maximum)
2. Use a professional, confident tone
3. Include relevant keywords from the job description
4. Highlight specific achievements and quantifiable results
5. Show genuine interest in the company and role
6. Avoid generic phrases and clichés
7. Use active voice and strong action verbs
8. Ensure ATS compatibility with clean formatting
9. Create a compelling opening that grabs attention
10. End with a strong call to action

Format the cover letter with proper business letter structure."#;

const USER_PROMPT_TEMPLATE: &str = r#"Please write a compelling, ATS-friendly cover letter based on the following information:

RESUME INFORMATION:
{resume}

JOB DESCRIPTION:
{job}

ADDITIONAL DETAILS:
Company Name: {company}
Position Title: {position}

REQUIREMENTS:
1. Write a professional cover letter that highlights relevant experience from the resume
2. Match the tone and keywords from the job description
3. Include specific achievements and quantifiable results where possible
4. Show enthusiasm for the role and company
5. Keep it between 250-400 words
6. Use proper business letter formatting
7. Make it ATS-friendly with clean, simple formatting
8. Avoid generic phrases - make it personalized and specific
9. Include a strong opening and compelling call to action
10. If company name or position title are not provided, use placeholders like [Company Name] and [Position Title]

The cover letter should be ready to use with minimal editing and should significantly increase the candidate's chances of getting an interview."#;

pub const SAMPLE_COVER_LETTER: &str = r#"[Date]

Dear Hiring Manager,

I am writing to express my strong interest in the [Position Title] position at [Company Name]. With my background in [relevant field] and proven track record of [specific achievement], I am excited about the opportunity to contribute to your team's continued success.

In my previous role as [previous position], I successfully [specific accomplishment with numbers/metrics]. This experience has equipped me with [relevant skills] that directly align with your requirements for [specific job requirement]. I am particularly drawn to [Company Name] because of [specific reason related to company/mission].

Your job description mentions the need for [specific requirement from job posting]. In my experience, I have [relevant experience that matches this requirement]. For example, [specific example with results]. I am confident that these skills, combined with my passion for [relevant area], make me a strong candidate for this position.

I would welcome the opportunity to discuss how my experience and enthusiasm can contribute to [Company Name]'s objectives. Thank you for considering my application, and I look forward to hearing from you soon.

Sincerely,
[Your Name]"#;

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn label_or<'a>(label: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match label {
        Some(value) if !value.trim().is_empty() => value,
        _ => placeholder,
    }
}

/// Render the user prompt. Resume and job text are cut to fit the model's
/// context; missing labels become bracketed placeholders.
pub fn build_prompt(
    resume_text: &str,
    job_description: &str,
    company_name: Option<&str>,
    position_title: Option<&str>,
) -> String {
    USER_PROMPT_TEMPLATE
        .replace("{resume}", truncate_chars(resume_text, RESUME_PROMPT_CHARS))
        .replace("{job}", truncate_chars(job_description, JOB_PROMPT_CHARS))
        .replace("{company}", label_or(company_name, COMPANY_PLACEHOLDER))
        .replace("{position}", label_or(position_title, POSITION_PLACEHOLDER))
}

fn blank_lines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"))
}

fn spaces_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("Invalid space regex"))
}

/// Normalise a generated letter: date line, closing, placeholder
/// substitution and whitespace cleanup.
pub fn post_process(
    letter: &str,
    company_name: Option<&str>,
    position_title: Option<&str>,
) -> String {
    let mut letter = letter.trim().to_string();

    if !letter.starts_with("Dear") && !letter.starts_with("[Date]") && !letter.contains("Date:") {
        letter = format!("[Date]\n\n{}", letter);
    }

    let lower = letter.to_lowercase();
    if !CLOSINGS.iter().any(|closing| lower.contains(closing)) {
        letter.push_str("\n\nSincerely,\n[Your Name]");
    }

    if let Some(company) = company_name.filter(|c| !c.trim().is_empty()) {
        letter = letter.replace(COMPANY_PLACEHOLDER, company);
    }
    if let Some(position) = position_title.filter(|p| !p.trim().is_empty()) {
        letter = letter.replace(POSITION_PLACEHOLDER, position);
    }

    let letter = blank_lines_regex().replace_all(&letter, "\n\n");
    spaces_regex().replace_all(&letter, " ").into_owned()
}
