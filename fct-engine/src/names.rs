//! 配置名称的宽松匹配：不区分大小写，忽略 `-`、`_` 与空格。

/// 归一化名称：小写并去掉分隔符
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Top-Left"), "topleft");
        assert_eq!(normalize("in_out quad"), "inoutquad");
        assert_eq!(normalize("  "), "");
    }
}
