//! System instructions for each generative call.
//!
//! Every instruction names the markers the response must use, built from
//! [`BlockKind::markers`] so the wire format is defined in one place.

use crate::models::{ExtractionCandidate, ToolModule};
use crate::parser::BlockKind;

/// Document synthesis: a full SKILL.md plus a manifest summary.
pub fn synthesis_instruction() -> String {
    let (doc_start, doc_end) = BlockKind::SkillDocument.markers();
    let (json_start, json_end) = BlockKind::ManifestUpdate.markers();
    format!(
        "You are an expert technical writer. From the interview transcript below, produce two parts:

1. A structured SKILL.md with a level-1 title and these five level-2 sections, in order:
   - Role
   - Capabilities
   - Decision Chain
   - Constraints
   - Output Spec

2. A JSON object with `description` (one sentence describing the skill) and `tags` (a list of keyword tags).

Output format:
- Wrap the Markdown in {doc_start} and {doc_end}
- Wrap the JSON in {json_start} and {json_end}

Example:
{doc_start}
# skill-name

## Role
...
{doc_end}

{json_start}
{{\"description\": \"...\", \"tags\": [\"tag1\", \"tag2\"]}}
{json_end}
"
    )
}

pub fn synthesis_request(transcript: &str) -> String {
    format!("Here is the interview transcript:\n\n{transcript}")
}

/// Analysis: find functions worth lifting into tools.
pub fn analysis_instruction() -> String {
    let (start, end) = BlockKind::Analysis.markers();
    format!(
        "You are a senior code analyst. Analyze Python source code and detect complex business \
calculation logic or repeated domain evaluation workflows.

Such logic usually:
- performs multi-step numeric calculations or evaluation flows
- applies domain-specific thresholds, scoring models, or risk assessments
- encodes reusable business rules or decision logic
- contains non-trivial branching or data transformation

Return the analysis as JSON wrapped in markers:
{start}
{{
  \"found\": true,
  \"functions\": [
    {{
      \"name\": \"function_name\",
      \"reason\": \"why this function should become a skill tool\",
      \"line_start\": 1,
      \"line_end\": 20,
      \"code\": \"full source of the function\"
    }}
  ]
}}
{end}

If nothing is worth extracting, return {{\"found\": false, \"functions\": []}}."
    )
}

pub fn analysis_request(source: &str) -> String {
    format!("Analyze the following Python code:\n\n```python\n{source}\n```")
}

/// Refactor: turn one candidate into a standard tool module plus a doc line.
pub fn refactor_instruction() -> String {
    let (code_start, code_end) = BlockKind::ToolCode.markers();
    let (doc_start, doc_end) = BlockKind::SkillDoc.markers();
    format!(
        "You are a refactoring expert. Rewrite a Python function as a standard skill tool.

A standard tool:
1. starts with a module docstring naming the tool and the skill it belongs to
2. exposes a `run(**kwargs)` entry point
3. reads its parameters from kwargs inside run() and performs the business logic
4. keeps the original business logic, adapted to the tool calling convention
5. returns a JSON-serializable dict

Also write a short SKILL.md entry describing what the tool does and its parameters.

Output format:
- Wrap the tool code in {code_start} and {code_end}
- Wrap the SKILL.md entry in {doc_start} and {doc_end}

Example:
{code_start}
\"\"\"
Tool: calculate_risk_score
Skill: financial-report-analyzer
\"\"\"


def run(**kwargs):
    \"\"\"Calculate a risk score.\"\"\"
    revenue = kwargs.get(\"revenue\", 0)
    # ... business logic ...
    return {{\"risk_score\": score}}
{code_end}

{doc_start}
- **calculate_risk_score**: Computes a risk score from financial data. Parameters: revenue, debt.
{doc_end}
"
    )
}

pub fn refactor_request(skill_name: &str, candidate: &ExtractionCandidate) -> String {
    format!(
        "Refactor the following function into a skill tool.\nSkill: {skill_name}\nFunction: {}\n\n```python\n{}\n```",
        candidate.name, candidate.code
    )
}

/// Schema compilation: tool-use schemas for every scanned tool.
pub fn schema_instruction() -> String {
    let (start, end) = BlockKind::Schema.markers();
    format!(
        "You are an API schema expert. From a SKILL.md document and tool source information, \
generate tool-use JSON schemas.

Each tool's schema looks like:
{{
  \"name\": \"tool name\",
  \"description\": \"tool description (combine SKILL.md context with the code docstrings)\",
  \"input_schema\": {{
    \"type\": \"object\",
    \"properties\": {{
      \"param\": {{
        \"type\": \"param type\",
        \"description\": \"param description\"
      }}
    }},
    \"required\": [\"required params\"]
  }}
}}

Infer the parameters from how run() uses kwargs and from its docstring.

Output format (wrapped in markers):
{start}
[
  {{ ... }},
  {{ ... }}
]
{end}
"
    )
}

pub fn schema_request(document: &str, tools: &[ToolModule]) -> String {
    let mut description = String::new();
    for tool in tools {
        description.push_str(&format!("\n### Tool: {}\n", tool.name));
        if let Some(doc) = &tool.module_doc {
            description.push_str(&format!("Module docstring: {doc}\n"));
        }
        if let Some(doc) = &tool.run_doc {
            description.push_str(&format!("run() docstring: {doc}\n"));
        }
        description.push_str(&format!("Full source:\n```python\n{}\n```\n", tool.source));
    }
    format!("Here is the SKILL.md content:\n\n{document}\n\nHere is the tool information:\n{description}")
}
