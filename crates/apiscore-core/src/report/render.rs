use crate::pipeline::Certification;
use crate::report::model::{Grade, ValidationResult};
use crate::TOOL_NAME;

/// Plain-text rendering of a completed certification.
pub fn render_text(certification: &Certification, results: &[ValidationResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{TOOL_NAME} certification\n"));
    out.push_str(&format!("Root: {}\n", certification.root.display()));
    out.push_str(&format!(
        "Source: {:?}\n",
        certification.metadata.source_kind
    ));
    out.push_str(&format!("Archive: {}\n", certification.archive.display()));
    out.push_str(&format!(
        "Service status: {}\n",
        certification.response.status
    ));

    out.push_str("Submitted APIs:\n");
    for api in &certification.metadata.apis {
        out.push_str(&format!(
            "  - {} [{}] {}\n",
            api.name, api.spec_type, api.definition_path
        ));
    }

    if results.is_empty() {
        out.push_str("No validation results returned.\n");
        return out;
    }

    out.push_str("Results:\n");
    for result in results {
        out.push_str(&format!(
            "  - {} ({}) rating {}\n",
            result.api_name, result.api_protocol, result.rating
        ));
        push_grade(&mut out, "documentation", result.documentation_grade.as_ref());
        push_grade(&mut out, "linting", result.linting_grade.as_ref());
        push_grade(&mut out, "security", result.security_grade.as_ref());
    }
    out
}

fn push_grade(out: &mut String, dimension: &str, grade: Option<&Grade>) {
    if let Some(grade) = grade {
        out.push_str(&format!(
            "      {}: {} {}\n",
            dimension, grade.grade, grade.description
        ));
    }
}
