//! Prototype generation and marketplace section splitting.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use builderschool_observe::genai_attrs::OP_GENERATE_PROTOTYPE;
use builderschool_types::plan::{PrototypeArtifact, PrototypeSection, Refinement};
use builderschool_types::wizard::IdeaType;

use super::GenerationTemplate;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## SECTION \d+[^\n]*").expect("valid section regex"));

const LANDING_PAGE_PROMPT: &str = r#"Generate a complete, self-contained HTML landing page for a student startup.

Requirements:
- One .html file with all CSS inline
- Load Tailwind CSS from the CDN: <script src="https://cdn.tailwindcss.com"></script>
- Sections in this order: a navbar with the startup name, a hero with a bold headline, subheading and call-to-action button, three feature cards in a grid, and a simple footer
- Use indigo or teal as the accent colour
- It must look modern and professional in a browser
- Output ONLY the HTML, starting with <!DOCTYPE html>
- No explanation, no markdown fences"#;

const AI_TOOL_PROMPT: &str = r#"Generate a complete, runnable Streamlit Python app for an AI tool startup.

Begin with EXACTLY this comment block, filled in for this idea:
# ============================================================
# AI TOOL: [Tool Name]
# DESCRIPTION: [One sentence]
# SETUP: pip install streamlit groq
# RUN:   streamlit run ai_tool.py
# ============================================================

Requirements:
- Import streamlit and groq
- A sidebar st.text_input for GROQ_API_KEY with type="password"
- st.title() plus an st.write() description
- An input area specific to this idea and a Generate button
- On click, call Groq llama-3.3-70b-versatile with a system prompt written for this use case
- Show the response with st.markdown
- Wrap the call in try/except and report failures with st.error()
- No placeholders: the code must run as-is

Output ONLY Python code starting with the comment block. No markdown fences."#;

const MARKETPLACE_PROMPT: &str = r#"Generate a complete marketplace startup prototype in THREE sections.

Use EXACTLY these headers:

## SECTION 1: HTML FRONTEND
Self-contained HTML using the Tailwind CDN (<script src="https://cdn.tailwindcss.com"></script>).
Include a navbar, a buyer listing grid with a search bar, and a seller form for posting a listing.

## SECTION 2: DATABASE SCHEMA
SQL CREATE TABLE statements for users, listings, transactions and reviews.
Include PRIMARY KEY and FOREIGN KEY constraints and indexes.

## SECTION 3: FLASK API SCAFFOLD
Start with: # pip install flask flask-sqlalchemy
Include 5 routes: GET /listings, POST /listings, POST /users/register, POST /users/login, POST /transactions
Return JSON, validate input, and set up SQLite.

Output ONLY code under the three section headers. No other explanation."#;

pub struct PrototypePrompt<'a> {
    pub idea: &'a str,
    pub idea_type: IdeaType,
    pub refinement: &'a Refinement,
}

impl GenerationTemplate for PrototypePrompt<'_> {
    type Output = PrototypeArtifact;
    const OPERATION: &'static str = OP_GENERATE_PROTOTYPE;
    const MAX_TOKENS: u32 = 3500;

    fn system_prompt(&self) -> String {
        match self.idea_type {
            IdeaType::AppOrWebsite => LANDING_PAGE_PROMPT,
            IdeaType::AiTool => AI_TOOL_PROMPT,
            IdeaType::Marketplace => MARKETPLACE_PROMPT,
        }
        .to_string()
    }

    fn user_message(&self) -> String {
        let features: Vec<String> = self
            .refinement
            .core_features
            .iter()
            .map(|f| format!("- {f}"))
            .collect();
        format!(
            "Startup: {}\nProblem: {}\nTarget user: {}\nCore features:\n{}",
            self.idea,
            self.refinement.problem_statement,
            self.refinement.target_user,
            features.join("\n")
        )
    }

    /// Text is kept verbatim. A missing marker is logged, not rejected.
    fn parse(&self, raw: &str) -> Result<PrototypeArtifact, String> {
        if raw.trim().is_empty() {
            return Err("prototype is empty".to_string());
        }
        if let Some(expected) = shape_marker(self.idea_type, raw) {
            warn!(idea_type = %self.idea_type, expected, "prototype does not have the expected shape");
        }
        Ok(PrototypeArtifact {
            idea_type: self.idea_type,
            code: raw.to_string(),
        })
    }
}

/// Returns the marker the output should have carried, if it is missing.
fn shape_marker(idea_type: IdeaType, code: &str) -> Option<&'static str> {
    let trimmed = code.trim_start();
    match idea_type {
        IdeaType::AppOrWebsite => {
            let head = trimmed.get(..15).unwrap_or(trimmed);
            (!head.eq_ignore_ascii_case("<!DOCTYPE html>")).then_some("<!DOCTYPE html>")
        }
        IdeaType::AiTool => (!trimmed.starts_with("# ====")).then_some("# ==== header block"),
        IdeaType::Marketplace => {
            (SECTION_HEADER.find_iter(code).count() < 3).then_some("three ## SECTION headers")
        }
    }
}

/// Section view of a stored prototype.
pub trait PrototypeArtifactExt {
    fn sections(&self) -> Vec<PrototypeSection>;
}

impl PrototypeArtifactExt for PrototypeArtifact {
    fn sections(&self) -> Vec<PrototypeSection> {
        split_sections(&self.code)
    }
}

/// Split marketplace output on its `## SECTION N` headers.
///
/// Text before the first header is dropped. Output with no header at all
/// comes back as one untitled python section.
pub fn split_sections(code: &str) -> Vec<PrototypeSection> {
    let headers: Vec<_> = SECTION_HEADER.find_iter(code).collect();
    if headers.is_empty() {
        return vec![PrototypeSection {
            header: String::new(),
            language: "python".to_string(),
            body: code.trim().to_string(),
        }];
    }

    headers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = headers.get(i + 1).map_or(code.len(), |next| next.start());
            let header = m.as_str().trim().to_string();
            let language = if header.contains("HTML") {
                "html"
            } else if header.contains("DATABASE") {
                "sql"
            } else {
                "python"
            };
            PrototypeSection {
                language: language.to_string(),
                body: code[m.end()..end].trim().to_string(),
                header,
            }
        })
        .collect()
}
