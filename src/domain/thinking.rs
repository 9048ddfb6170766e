//! 思考片段检测与过滤
//!
//! AI 回复开头常以括号包裹"内心独白"，例如 `（思考中……）你好`。
//! 支持半角 `(` `)` 与全角 `（` `）` 两种括号，两种括号共用同一个栈，
//! 不区分类型配对：`(` 可以被 `）` 闭合，反之亦然。

#[inline]
fn is_open_bracket(ch: char) -> bool {
    matches!(ch, '(' | '（')
}

#[inline]
fn is_close_bracket(ch: char) -> bool {
    matches!(ch, ')' | '）')
}

/// 括号扫描结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// 没有左括号
    NoBracket,
    /// 找到完整区域（字节区间，闭区间右端为闭括号起始位置）
    Closed { start: usize, end: usize },
    /// 有左括号但未闭合
    Open,
}

/// 从第一个左括号开始扫描，找到栈第一次清空的位置
fn scan_first_span(content: &str) -> Scan {
    let Some(start) = content.find(is_open_bracket) else {
        return Scan::NoBracket;
    };

    let mut depth: usize = 0;
    for (offset, ch) in content[start..].char_indices() {
        if is_open_bracket(ch) {
            depth += 1;
        } else if is_close_bracket(ch) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                let end = start + offset + ch.len_utf8();
                return Scan::Closed { start, end };
            }
        }
    }

    Scan::Open
}

/// 是否仍在思考中（存在未闭合的思考片段）
pub fn is_thinking(content: &str) -> bool {
    matches!(scan_first_span(content), Scan::Open)
}

/// 移除第一个完整的思考片段
///
/// 没有完整片段时原样返回
pub fn filter_thinking_content(content: &str) -> String {
    match scan_first_span(content) {
        Scan::Closed { start, end } => {
            let mut filtered = String::with_capacity(content.len() - (end - start));
            filtered.push_str(&content[..start]);
            filtered.push_str(&content[end..]);
            filtered
        }
        Scan::NoBracket | Scan::Open => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_thinking() {
        assert!(is_thinking("（still going"));
        assert!(!is_thinking("（done）rest"));
        assert!(!is_thinking("no brackets here"));
    }

    #[test]
    fn test_nested_brackets() {
        assert!(is_thinking("(a (b) c"));
        assert!(!is_thinking("(a (b) c)"));
        assert_eq!(filter_thinking_content("x(a(b)c)y"), "xy");
    }

    #[test]
    fn test_mixed_bracket_styles_balance() {
        assert!(!is_thinking("(半角开全角闭）"));
        assert_eq!(filter_thinking_content("前（混合)后"), "前后");
    }

    #[test]
    fn test_closer_before_first_opener_is_ignored() {
        assert!(!is_thinking(") leading (x) tail"));
        assert_eq!(filter_thinking_content(") a (b) c"), ") a  c");
    }

    #[test]
    fn test_filter_excision() {
        assert_eq!(filter_thinking_content("A（B）C"), "AC");
        assert_eq!(filter_thinking_content("A（B"), "A（B");
        assert_eq!(filter_thinking_content("plain"), "plain");
    }

    #[test]
    fn test_only_first_span_removed() {
        assert_eq!(filter_thinking_content("（一）中（二）"), "中（二）");
    }

    #[test]
    fn test_streamed_message_unclosed_then_closed() {
        // 流式到达的同一条消息，每次传入累积文本。
        // 中间一段仍未闭合；若写成 "（thinking more）Hello" 则已闭合，不再是思考状态
        let chunks = ["（thinking", "（thinking more", "（thinking more）Hello world"];
        let states: Vec<bool> = chunks.iter().map(|c| is_thinking(c)).collect();
        assert_eq!(states, vec![true, true, false]);
        assert_eq!(filter_thinking_content(chunks[2]), "Hello world");

        // 闭合之后即使文本还在增长也不再是思考状态
        assert!(!is_thinking("（thinking more）Hello"));
    }
}
