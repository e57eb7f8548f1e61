//! 作业清单模板
//!
//! 模板语法只支持字段占位符 `{{ .Field }}`（花括号内空白可选），字段见 TEMPLATE_FIELDS。
//! 模板在启动时解析一次：未知字段、未闭合的 `{{`、其它模板动作都在解析阶段报错。

use std::sync::OnceLock;

use regex::Regex;

use crate::core::ReconcileError;
use crate::jobs::JobDescriptor;

/// 可用的占位符字段
pub const TEMPLATE_FIELDS: [&str; 5] = ["Name", "DataDir", "Finished", "Namespace", "Identity"];

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// 已解析的作业模板
#[derive(Debug, Clone)]
pub struct JobTemplate {
    segments: Vec<Segment>,
}

impl JobTemplate {
    pub fn parse(source: &str) -> Result<Self, ReconcileError> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in placeholder_re().captures_iter(source) {
            let (Some(whole), Some(field)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &source[last..whole.start()])?;
            if !TEMPLATE_FIELDS.contains(&field.as_str()) {
                return Err(ReconcileError::Template(format!(
                    "unknown field '.{}' (available: {})",
                    field.as_str(),
                    TEMPLATE_FIELDS.join(", ")
                )));
            }
            segments.push(Segment::Field(field.as_str().to_string()));
            last = whole.end();
        }
        push_literal(&mut segments, &source[last..])?;

        Ok(Self { segments })
    }

    /// 用描述符字段填充模板
    pub fn render(&self, job: &JobDescriptor) -> Result<String, ReconcileError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => {
                    let value = job.template_field(field).ok_or_else(|| {
                        ReconcileError::Template(format!("no value for field '.{}'", field))
                    })?;
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<(), ReconcileError> {
    if let Some(pos) = text.find("{{") {
        let snippet: String = text[pos..].chars().take(24).collect();
        return Err(ReconcileError::Template(format!(
            "unsupported or unterminated action near '{}'",
            snippet
        )));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}
