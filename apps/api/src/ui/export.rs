//! Plain-text downloads derived from a record.

use serde::Deserialize;

use crate::tailor::record::TailorRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Report,
    CoverLetter,
    Skills,
}

impl ExportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::Report => "resume_analysis_report.txt",
            ExportKind::CoverLetter => "tailored_cover_letter.txt",
            ExportKind::Skills => "skills_analysis.txt",
        }
    }

    pub fn render(self, record: &TailorRecord) -> String {
        match self {
            ExportKind::Report => full_report(record),
            ExportKind::CoverLetter => record.cover_letter.clone(),
            ExportKind::Skills => skills_only(record),
        }
    }
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn full_report(record: &TailorRecord) -> String {
    format!(
        "Resume Match Analysis Report\n\n\
         Match Score: {}%\n\n\
         MATCHED SKILLS:\n{}\n\n\
         MISSING SKILLS:\n{}\n\n\
         IMPROVED BULLET POINTS:\n{}\n\n\
         COVER LETTER:\n{}\n",
        record.score_percent(),
        bullet_lines(&record.matched_skills),
        bullet_lines(&record.missing_skills),
        bullet_lines(&record.improved_bullets),
        record.cover_letter
    )
}

pub fn skills_only(record: &TailorRecord) -> String {
    format!(
        "Matched Skills:\n{}\n\nMissing Skills:\n{}\n",
        bullet_lines(&record.matched_skills),
        bullet_lines(&record.missing_skills)
    )
}
