#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

use serde::Deserialize as _;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

/// Shown when a result carries no score at all.
pub const DEFAULT_MATCH_SCORE: u8 = 75;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suitability {
    #[serde(deserialize_with = "null_as_default")]
    pub overall: String,
    #[serde(deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub concerns: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGaps {
    #[serde(deserialize_with = "null_as_default")]
    pub missing: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub weak: Vec<String>,
}

/// Response body of `/api/analyze`. Every field is optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub match_score: Option<u8>,
    pub suitability: Option<Suitability>,
    pub skill_gaps: Option<SkillGaps>,
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub optimized_resume: String,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    return Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default);
}

/// Model backed services are loose with numbers, so floats and numeric strings
/// are accepted and clamped to 0..=100. Anything else counts as absent.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let score = match value {
        Some(Value::Number(num)) => num.as_f64(),
        Some(Value::String(text)) => text.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };

    return Ok(score
        .filter(|e| return e.is_finite())
        .map(|e| return e.round().clamp(0.0, 100.0) as u8));
}

impl AnalysisResult {
    pub fn score_target(&self) -> u8 {
        return self.match_score.unwrap_or(DEFAULT_MATCH_SCORE).min(100);
    }

    pub fn has_optimized_resume(&self) -> bool {
        return !self.optimized_resume.trim().is_empty();
    }

    /// Fixed stand-in used whenever the analysis service can't be reached.
    pub fn mock() -> AnalysisResult {
        return AnalysisResult {
            match_score: Some(78),
            suitability: Some(Suitability {
                overall: "Good match for this position".to_string(),
                strengths: vec![
                    "Strong technical background in required technologies".to_string(),
                    "Relevant work experience in similar roles".to_string(),
                    "Educational background aligns with job requirements".to_string(),
                ],
                concerns: vec![
                    "Limited experience with some specific tools mentioned".to_string(),
                    "Could benefit from additional certifications".to_string(),
                ],
            }),
            skill_gaps: Some(SkillGaps {
                missing: vec![
                    "AWS Cloud Certification".to_string(),
                    "Docker containerization experience".to_string(),
                    "Agile/Scrum methodology experience".to_string(),
                ],
                weak: vec![
                    "Leadership experience".to_string(),
                    "Public speaking skills".to_string(),
                    "Project management".to_string(),
                ],
            }),
            recommendations: mock_recommendations(),
            optimized_resume: mock_resume_html(),
        };
    }
}

pub fn mock_recommendations() -> Vec<String> {
    return vec![
        "Consider obtaining AWS certification to strengthen cloud computing credentials"
            .to_string(),
        "Highlight any containerization or DevOps experience more prominently".to_string(),
        "Add specific metrics and achievements to quantify your impact".to_string(),
        "Include relevant keywords from the job description naturally throughout your resume"
            .to_string(),
        "Consider adding a professional summary section at the top".to_string(),
    ];
}

fn mock_resume_html() -> String {
    return r#"
<div class="resume-section">
    <h3>John Doe</h3>
    <p>Software Engineer | Full Stack Developer</p>
    <p>Email: john.doe@email.com | Phone: (555) 123-4567 | LinkedIn: linkedin.com/in/johndoe</p>
</div>

<div class="resume-section">
    <h4>Professional Summary</h4>
    <p>Experienced software engineer with 5+ years of expertise in full-stack development, specializing in React, Node.js, and cloud technologies. Proven track record of delivering scalable web applications and leading cross-functional teams to achieve project goals.</p>
</div>

<div class="resume-section">
    <h4>Technical Skills</h4>
    <ul>
        <li><strong>Frontend:</strong> React, JavaScript, TypeScript, HTML5, CSS3, Redux</li>
        <li><strong>Backend:</strong> Node.js, Express.js, Python, RESTful APIs</li>
        <li><strong>Database:</strong> MongoDB, PostgreSQL, MySQL</li>
        <li><strong>Cloud:</strong> AWS (EC2, S3, Lambda), Docker, Kubernetes</li>
        <li><strong>Tools:</strong> Git, Jenkins, Jira, Agile/Scrum</li>
    </ul>
</div>

<div class="resume-section">
    <h4>Professional Experience</h4>
    <div class="job">
        <h5>Senior Software Engineer - Tech Solutions Inc. (2021-Present)</h5>
        <ul>
            <li>Led development of customer-facing web application serving 100K+ users</li>
            <li>Improved application performance by 40% through code optimization and caching strategies</li>
            <li>Mentored junior developers and conducted code reviews</li>
        </ul>
    </div>

    <div class="job">
        <h5>Software Engineer - Digital Innovations LLC (2019-2021)</h5>
        <ul>
            <li>Developed and maintained multiple React-based web applications</li>
            <li>Collaborated with UX/UI designers to implement responsive designs</li>
            <li>Integrated third-party APIs and payment processing systems</li>
        </ul>
    </div>
</div>

<div class="resume-section">
    <h4>Education</h4>
    <p><strong>Bachelor of Science in Computer Science</strong><br>
    University of Technology (2015-2019)</p>
</div>

<div class="resume-section">
    <h4>Certifications</h4>
    <ul>
        <li>AWS Certified Developer - Associate (2022)</li>
        <li>React Developer Certification (2021)</li>
    </ul>
</div>
"#
    .trim()
    .to_string();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultSource {
    /// Parsed from the analysis service response.
    Service,
    /// The service failed and the mock result was substituted.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: ResultSource,
}

impl AnalysisOutcome {
    pub fn from_service(result: AnalysisResult) -> AnalysisOutcome {
        return AnalysisOutcome {
            result,
            source: ResultSource::Service,
        };
    }

    pub fn fallback() -> AnalysisOutcome {
        return AnalysisOutcome {
            result: AnalysisResult::mock(),
            source: ResultSource::Fallback,
        };
    }
}
