use super::candidates::{candidate_pool, RUNTIME_HINTS};
use super::context::TokenContext;
use crate::mapping::Mapping;

/// 插入结果：新文本与新光标位置（字节偏移）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    pub cursor: usize,
}

/// 模式 A：把选中的表达式写入活动 token
///
/// 替换 `[replace_from, cursor)`；若原 `{{` 之后没有 `}}` 则补上闭合，
/// 光标落在表达式之后（闭合 `}}` 之前）。替换区间之外的字节逐字节保留。
pub fn apply_suggestion(text: &str, ctx: &TokenContext, expr: &str) -> Insertion {
    let mut out = String::with_capacity(text.len() + expr.len() + 2);
    out.push_str(&text[..ctx.replace_from]);
    out.push_str(expr);
    let cursor = out.len();
    if !ctx.has_closing {
        out.push_str("}}");
    }
    out.push_str(&text[ctx.cursor..]);
    Insertion { text: out, cursor }
}

/// 模式 B：在光标处插入完整的 `{{expr}}` token，不做片段替换
pub fn insert_token(text: &str, cursor: usize, expr: &str) -> Insertion {
    let cursor = if cursor <= text.len() && text.is_char_boundary(cursor) {
        cursor
    } else {
        text.len()
    };
    let token = format!("{{{{{}}}}}", expr);
    let mut out = String::with_capacity(text.len() + token.len());
    out.push_str(&text[..cursor]);
    out.push_str(&token);
    let new_cursor = out.len();
    out.push_str(&text[cursor..]);
    Insertion {
        text: out,
        cursor: new_cursor,
    }
}

/// 选择器里的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub expr: String,
    pub label: String,
}

/// 选择器分组：运行时变量一组，每条入边映射一组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerGroup {
    pub label: String,
    pub items: Vec<PickerItem>,
}

/// 构建显式选择器的分组列表
pub fn picker_groups(mappings: &[Mapping]) -> Vec<PickerGroup> {
    let mut groups = Vec::with_capacity(mappings.len() + 1);

    groups.push(PickerGroup {
        label: "runtime".to_string(),
        items: RUNTIME_HINTS
            .iter()
            .map(|hint| PickerItem {
                expr: (*hint).to_string(),
                label: (*hint).to_string(),
            })
            .collect(),
    });

    for mapping in mappings {
        let label = format!(
            "{} ({} → {})",
            mapping.source_name, mapping.source_output, mapping.target_key
        );
        let items = candidate_pool(std::slice::from_ref(mapping))
            .into_iter()
            .filter(|c| c.detail != "runtime")
            .map(|c| PickerItem {
                label: c.expr.clone(),
                expr: c.expr,
            })
            .collect();
        groups.push(PickerGroup { label, items });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use crate::suggest::context::token_context;

    #[test]
    fn test_apply_adds_closing_braces() {
        let text = "Hi {{doc";
        let ctx = token_context(text, text.len()).unwrap();
        let result = apply_suggestion(text, &ctx, "documents");
        assert_eq!(result.text, "Hi {{documents}}");
        // 光标位于表达式末尾、"}}" 之前
        assert_eq!(&result.text[..result.cursor], "Hi {{documents");
    }

    #[test]
    fn test_apply_keeps_existing_closing() {
        let text = "{{do}} tail";
        let ctx = token_context(text, 4).unwrap();
        let result = apply_suggestion(text, &ctx, "documents");
        assert_eq!(result.text, "{{documents}} tail");
        assert_eq!(&result.text[..result.cursor], "{{documents");
    }

    #[test]
    fn test_apply_preserves_surrounding_bytes() {
        let text = "前缀 {{qu 后缀";
        let cursor = "前缀 {{qu".len();
        let ctx = token_context(text, cursor).unwrap();
        let result = apply_suggestion(text, &ctx, "query");
        assert!(result.text.starts_with("前缀 {{query"));
        assert!(result.text.ends_with(" 后缀"));
    }

    #[test]
    fn test_insert_token_at_cursor() {
        let result = insert_token("ab", 1, "input.query");
        assert_eq!(result.text, "a{{input.query}}b");
        assert_eq!(&result.text[..result.cursor], "a{{input.query}}");
    }

    #[test]
    fn test_insert_token_bad_cursor_appends() {
        let result = insert_token("ab", 99, "x");
        assert_eq!(result.text, "ab{{x}}");
    }

    #[test]
    fn test_picker_groups() {
        let mappings = vec![Mapping {
            edge_id: "e1".into(),
            source_id: "rag1".into(),
            source_name: "Retriever".into(),
            source_kind: NodeKind::RagRetriever,
            source_output: "documents".into(),
            target_key: "documents".into(),
        }];
        let groups = picker_groups(&mappings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "runtime");
        assert_eq!(groups[0].items.len(), RUNTIME_HINTS.len());
        assert_eq!(groups[1].label, "Retriever (documents → documents)");
        assert!(groups[1].items.iter().any(|i| i.expr == "documents[0].text"));
        assert!(groups[1].items.iter().all(|i| !i.expr.starts_with("input.")));
    }
}
