use std::collections::HashSet;

use crate::mapping::Mapping;

/// 始终合法的运行时变量（与连接无关）
pub const RUNTIME_HINTS: &[&str] = &[
    "input.input",
    "input.prompt",
    "input.query",
    "input.text",
    "context.tenant_id",
    "context.user_id",
];

/// 建议列表最多返回的条数
pub const MAX_SUGGESTIONS: usize = 12;

/// 一条候选表达式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub expr: String,
    /// 来源说明（"runtime" 或源节点展示名）
    pub detail: String,
}

impl Candidate {
    fn new(expr: String, detail: &str) -> Self {
        Candidate {
            expr,
            detail: detail.to_string(),
        }
    }
}

/// 按源输出字段扩展的形状提示
fn shape_hints(base: &str, source_output: &str) -> Vec<String> {
    match source_output {
        "documents" => vec![
            format!("{}[0].text", base),
            format!("{}[0].metadata", base),
            format!("{}[0].score", base),
        ],
        "metadata" => vec![
            format!("{}.model", base),
            format!("{}.usage.total_tokens", base),
        ],
        "result" | "response_data" => vec![
            format!("{}.content", base),
            format!("{}.text", base),
            format!("{}.data", base),
        ],
        _ => Vec::new(),
    }
}

/// 构建候选池：运行时变量 + 每条入边映射的展开
///
/// 每条映射给出 `target_key`、`data.<target_key>` 别名形式，以及按
/// `source_output` 追加的形状提示。相同表达式跨映射去重。
pub fn candidate_pool(mappings: &[Mapping]) -> Vec<Candidate> {
    let mut pool = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for hint in RUNTIME_HINTS {
        if seen.insert((*hint).to_string()) {
            pool.push(Candidate::new((*hint).to_string(), "runtime"));
        }
    }

    for mapping in mappings {
        let key = &mapping.target_key;
        let mut exprs = vec![key.clone(), format!("data.{}", key)];
        exprs.extend(shape_hints(key, &mapping.source_output));

        for expr in exprs {
            if seen.insert(expr.clone()) {
                pool.push(Candidate::new(expr, &mapping.source_name));
            }
        }
    }

    pool
}

/// 对候选排序：精确匹配 0 / 前缀 1 / 子串 2 / 其余剔除，同分按字典序，
/// 截断到 [`MAX_SUGGESTIONS`]。
pub fn rank_candidates(pool: &[Candidate], query: &str) -> Vec<Candidate> {
    let mut ranked: Vec<(u8, &Candidate)> = pool
        .iter()
        .filter_map(|candidate| {
            let rank = if candidate.expr == query {
                0
            } else if candidate.expr.starts_with(query) {
                1
            } else if candidate.expr.contains(query) {
                2
            } else {
                return None;
            };
            Some((rank, candidate))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.expr.cmp(&b.1.expr)));
    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, c)| c.clone())
        .collect()
}
