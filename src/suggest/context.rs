/// 光标处的活动补全上下文
///
/// 所有偏移均为字节偏移，且落在字符边界上。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenContext {
    /// 最近一个未闭合 `{{` 的起始偏移
    pub open_index: usize,
    /// 替换区间起点（`{{` 之后跳过前导空白）
    pub replace_from: usize,
    /// 替换区间终点（即光标）
    pub cursor: usize,
    /// 实时查询串 `text[replace_from..cursor]`
    pub query: String,
    /// 原 `{{` 之后（光标之后的剩余文本里）是否已有 `}}`
    pub has_closing: bool,
}

/// 探测光标处未闭合的 `{{` token
///
/// 从光标向前找最近的 `{{`；若它与光标之间出现 `}}` 则视为已闭合，
/// 返回 `None`（正常的"无建议"结果，不是错误）。
pub fn token_context(text: &str, cursor: usize) -> Option<TokenContext> {
    if cursor > text.len() || !text.is_char_boundary(cursor) {
        return None;
    }

    let before = &text[..cursor];
    let open_index = before.rfind("{{")?;

    // 最近的 {{ 已被 }} 闭合 → 更早的 {{ 也必然被同一个 }} 闭合
    if text[open_index + 2..cursor].contains("}}") {
        return None;
    }

    let mut replace_from = open_index + 2;
    for ch in text[replace_from..cursor].chars() {
        if ch.is_whitespace() {
            replace_from += ch.len_utf8();
        } else {
            break;
        }
    }

    Some(TokenContext {
        open_index,
        replace_from,
        cursor,
        query: text[replace_from..cursor].to_string(),
        has_closing: text[open_index + 2..].contains("}}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_token_detected() {
        let text = "Hello {{doc";
        let ctx = token_context(text, text.len()).unwrap();
        assert_eq!(ctx.open_index, 6);
        assert_eq!(ctx.replace_from, 8);
        assert_eq!(ctx.query, "doc");
        assert!(!ctx.has_closing);
    }

    #[test]
    fn test_leading_whitespace_skipped() {
        let text = "{{  inp";
        let ctx = token_context(text, text.len()).unwrap();
        assert_eq!(ctx.replace_from, 4);
        assert_eq!(ctx.query, "inp");
    }

    #[test]
    fn test_closed_token_yields_none() {
        let text = "{{done}} tail";
        assert!(token_context(text, text.len()).is_none());
    }

    #[test]
    fn test_second_open_token_wins() {
        let text = "{{a}} {{b";
        let ctx = token_context(text, text.len()).unwrap();
        assert_eq!(ctx.query, "b");
        assert_eq!(ctx.open_index, 6);
    }

    #[test]
    fn test_closing_after_cursor_detected() {
        let text = "{{que}} rest";
        // 光标位于 "que" 之后、"}}" 之前
        let ctx = token_context(text, 5).unwrap();
        assert_eq!(ctx.query, "que");
        assert!(ctx.has_closing);
    }

    #[test]
    fn test_no_token_at_all() {
        assert!(token_context("plain", 3).is_none());
        assert!(token_context("", 0).is_none());
    }

    #[test]
    fn test_cursor_out_of_range() {
        assert!(token_context("{{x", 99).is_none());
    }

    #[test]
    fn test_multibyte_text_before_token() {
        let text = "你好 {{qu";
        let ctx = token_context(text, text.len()).unwrap();
        assert_eq!(ctx.query, "qu");
        // 光标落在多字节字符中间时不产生上下文
        assert!(token_context(text, 1).is_none());
    }
}
