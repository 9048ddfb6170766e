//! 流式内容分割器
//!
//! 将流式 AI 回复（每次传入累积的完整文本）按行拆分为普通文本与特殊内容
//! （代码块、表格），并报告最后一个特殊块是否已经完整

use serde::Serialize;

/// 代码块围栏
const CODE_FENCE: &str = "```";

/// 表格列分隔符
const TABLE_PIPE: char = '|';

/// 分割结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitContent {
    /// 去除特殊内容后的普通文本（已 trim）
    pub plain_text: String,
    /// 所有特殊块按出现顺序拼接（已 trim）
    pub special_content: String,
    /// 最后一个特殊块是否已闭合
    pub is_special_content_complete: bool,
}

#[inline]
fn is_code_fence(line: &str) -> bool {
    line.trim().starts_with(CODE_FENCE)
}

#[inline]
fn is_table_row(line: &str) -> bool {
    line.contains(TABLE_PIPE)
}

/// 分割消息内容
///
/// 纯函数：同样的输入总是得到同样的输出，调用方每次传入到目前为止的完整文本。
///
/// 规则：
/// 1. 代码块：trim 后以 ``` 开头的行切换代码块模式，块内所有行（包括空行）原样收集，
///    遇到闭合围栏时整块写入特殊内容并标记完整
/// 2. 表格：代码块外包含 `|` 的行为表格行，下一行不含 `|`（或没有下一行）时表格结束
/// 3. 其他行追加到普通文本
/// 4. 输入在未闭合的块内结束时，残留内容仍写入特殊内容，但完整标记强制为 false
pub fn split_message_content(content: &str) -> SplitContent {
    let lines: Vec<&str> = content.split('\n').collect();

    let mut plain = String::new();
    let mut special = String::new();
    let mut code_block = String::new();
    let mut table = String::new();
    let mut in_code_block = false;
    let mut complete = false;

    for (i, line) in lines.iter().enumerate() {
        let next_line = lines.get(i + 1).copied();

        if is_code_fence(line) {
            if in_code_block {
                in_code_block = false;
                code_block.push_str(line);
                special.push_str(&code_block);
                special.push('\n');
                code_block.clear();
                complete = true;
                tracing::trace!(special_len = special.len(), "Code block closed");
            } else {
                in_code_block = true;
                code_block.push_str(line);
                code_block.push('\n');
                tracing::trace!(line = i, "Code block opened");
            }
            continue;
        }

        if in_code_block {
            code_block.push_str(line);
            code_block.push('\n');
            continue;
        }

        if is_table_row(line) {
            table.push_str(line);
            table.push('\n');

            // 向前看一行判断表格是否结束
            if !next_line.is_some_and(is_table_row) {
                special.push_str(&table);
                table.clear();
                complete = true;
                tracing::trace!(special_len = special.len(), "Table closed");
            }
            continue;
        }

        plain.push_str(line);
        plain.push('\n');
    }

    // 处理未闭合的残留内容
    if !code_block.is_empty() {
        special.push_str(&code_block);
        complete = false;
    }
    if !table.is_empty() {
        special.push_str(&table);
        complete = false;
    }

    SplitContent {
        plain_text: plain.trim().to_string(),
        special_content: special.trim().to_string(),
        is_special_content_complete: complete,
    }
}

/// 字幕文本：只显示普通文本部分
pub fn subtitle_text(content: &str) -> String {
    split_message_content(content).plain_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = split_message_content("");
        assert_eq!(result, SplitContent::default());
        assert!(!result.is_special_content_complete);
    }

    #[test]
    fn test_plain_only() {
        let result = split_message_content("hello\nworld\n");
        assert_eq!(result.plain_text, "hello\nworld");
        assert!(result.special_content.is_empty());
        assert!(!result.is_special_content_complete);
    }

    #[test]
    fn test_code_block_round_trip() {
        let result = split_message_content("prefix\n```js\ncode\n```\nsuffix");
        assert_eq!(result.plain_text, "prefix\nsuffix");
        assert_eq!(result.special_content, "```js\ncode\n```");
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_unterminated_code_block() {
        let result = split_message_content("prefix\n```js\ncode");
        assert_eq!(result.plain_text, "prefix");
        assert_eq!(result.special_content, "```js\ncode");
        assert!(!result.is_special_content_complete);
    }

    #[test]
    fn test_code_block_keeps_blank_lines_and_pipes() {
        let result = split_message_content("```\na | b\n\nc\n```");
        assert_eq!(result.special_content, "```\na | b\n\nc\n```");
        assert!(result.plain_text.is_empty());
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_indented_fence_is_recognized() {
        let result = split_message_content("intro\n  ```rust\nlet x = 1;\n  ```");
        assert_eq!(result.plain_text, "intro");
        assert!(result.special_content.contains("let x = 1;"));
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_table_detection() {
        let result = split_message_content("a|b\nc|d\nplain line");
        assert_eq!(result.special_content, "a|b\nc|d");
        assert_eq!(result.plain_text, "plain line");
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_single_pipe_line_is_complete_table() {
        let result = split_message_content("x | y");
        assert_eq!(result.special_content, "x | y");
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_open_code_block_overrides_earlier_complete_table() {
        let result = split_message_content("a|b\ntext\n```py\nprint(1)");
        assert_eq!(result.plain_text, "text");
        assert_eq!(result.special_content, "a|b\n```py\nprint(1)");
        assert!(!result.is_special_content_complete);
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let text = "one\n```\nfirst\n```\ntwo\n| h |\n| - |\nthree";
        let result = split_message_content(text);
        assert_eq!(result.plain_text, "one\ntwo\nthree");
        assert_eq!(result.special_content, "```\nfirst\n```\n| h |\n| - |");
        assert!(result.is_special_content_complete);
    }

    #[test]
    fn test_idempotent() {
        let text = "intro\n```\nbody\n```\n| a | b |\nend";
        assert_eq!(split_message_content(text), split_message_content(text));
    }

    #[test]
    fn test_growing_stream_prefix() {
        let full = "Here you go:\n```rust\nfn main() {}\n```\nDone.";
        let partial = &full[..full.find("fn main").unwrap() + 4];

        let early = split_message_content(partial);
        assert!(!early.is_special_content_complete);

        let late = split_message_content(full);
        assert!(late.is_special_content_complete);
        assert!(late.special_content.starts_with(&early.special_content[..7]));
        assert_eq!(late.plain_text, "Here you go:\nDone.");
    }

    #[test]
    fn test_subtitle_text() {
        assert_eq!(subtitle_text("说话中\n| a | b |"), "说话中");
    }
}
