//! Chat Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// 随音频下发的显示文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    /// 文本内容
    pub text: String,
    /// 说话角色名
    #[serde(default)]
    pub name: Option<String>,
    /// 头像
    #[serde(default)]
    pub avatar: Option<String>,
    /// 所属消息 ID（同一条回复的多个音频片段共享）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl DisplayText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            name: None,
            avatar: None,
            message_id: None,
        }
    }
}

/// 模型表情：既可以是表情序号，也可以是表情名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Index(u32),
    Name(String),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Index(i) => write!(f, "#{}", i),
            Expression::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_untagged() {
        let exprs: Vec<Expression> = serde_json::from_str(r#"[3, "smile"]"#).unwrap();
        assert_eq!(exprs[0], Expression::Index(3));
        assert_eq!(exprs[1], Expression::Name("smile".to_string()));
        assert_eq!(exprs[0].to_string(), "#3");
    }

    #[test]
    fn test_display_text_optional_fields() {
        let text: DisplayText = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(text, DisplayText::new("hi"));
    }
}
