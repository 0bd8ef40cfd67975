pub fn resume_text_fixture() -> &'static str {
    return r#"
Jane Smith
Senior Backend Engineer | jane.smith@email.com

Summary
Backend engineer with 7 years of experience building distributed systems in Rust and Go.

Experience
- Staff Engineer, Acme Cloud (2020-Present): led the migration of billing services to Rust.
- Software Engineer, DataWorks (2016-2020): built ingestion pipelines processing 2B events a day.

Skills
Rust, Go, PostgreSQL, Kafka, AWS, Terraform
"#
    .trim();
}

pub fn job_description_fixture() -> &'static str {
    return r#"
We are hiring a Senior Rust Engineer to design and operate high throughput services.
You will own our event ingestion platform, mentor engineers and work closely with product.
Experience with Kubernetes, PostgreSQL and AWS is a strong plus.
"#
    .trim();
}

pub fn analysis_json_fixture() -> &'static str {
    return r#"
{
    "matchScore": 82,
    "suitability": {
        "overall": "Strong match for this position",
        "strengths": [
            "Seven years of Rust and Go backend experience",
            "Has led a large migration to Rust"
        ],
        "concerns": ["No Kubernetes experience"]
    },
    "skillGaps": {
        "missing": ["Kubernetes"],
        "weak": ["Mentoring"]
    },
    "recommendations": [
        "Mention container orchestration exposure, even if informal",
        "Quantify the impact of the billing migration",
        "Add a short section on mentoring and leadership"
    ],
    "optimizedResume": "<div class=\"resume-section\"><h3>Jane Smith</h3><p>Senior Backend Engineer</p></div>"
}
"#
    .trim();
}
