//! 模式翻译
//!
//! 把编辑器语法的正则模式改写成引擎原生语法：
//! - `\<` / `\>` 词边界简写改写为零宽环视
//! - 整词 / 词首搜索时用 `\b` 包裹模式
//! - CR 行尾模式下把 `$` 改写为对回车的前瞻
//!
//! 整个翻译是一次转义感知的扫描：`\\` 作为整体原样保留，
//! 所以用户手写的字面量（如 `\\<`）不会被二次翻译，
//! 改写结果也不可能与后续改写规则撞车。翻译本身不会失败，
//! 非法模式留给引擎编译时报错。

use crate::options::EolMode;

/// 词首：前一个不是词字符且后一个是词字符
const WORD_BEGIN: &str = r"(?<!\w)(?=\w)";
/// 词尾：前一个是词字符且后一个不是词字符
const WORD_END: &str = r"(?<=\w)(?!\w)";
/// CR 行尾锚点
const CR_EOL: &str = r"(?=\r)";

/// 翻译一条编辑器语法的模式，单次变换，输出不可再次翻译
pub fn translate_pattern(
    pattern: &str,
    whole_word: bool,
    word_start: bool,
    eol_mode: EolMode,
) -> String {
    let wrap = whole_word || word_start;
    let mut out = String::with_capacity(pattern.len() + 16);

    if wrap {
        out.push_str(r"\b");
    }

    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('<') => out.push_str(WORD_BEGIN),
                Some('>') => out.push_str(WORD_END),
                // 其余转义保持原样，避免破坏用户手写的字面量
                Some(esc) => {
                    out.push('\\');
                    out.push(esc);
                }
                None => out.push('\\'),
            },
            // 历史行为：只有整词/词首包裹时 `.` 才退化为词字符类
            '.' if wrap => out.push_str(r"\w"),
            '$' if eol_mode == EolMode::Cr => out.push_str(CR_EOL),
            _ => out.push(ch),
        }
    }

    if whole_word {
        out.push_str(r"\b");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pattern_untouched() {
        assert_eq!(
            translate_pattern("a.c+[xy]$", false, false, EolMode::Lf),
            "a.c+[xy]$"
        );
    }

    #[test]
    fn test_whole_word_wraps_both_ends() {
        let out = translate_pattern("cat", true, false, EolMode::Lf);
        assert_eq!(out, r"\bcat\b");
    }

    #[test]
    fn test_word_start_wraps_start_only() {
        let out = translate_pattern("cat", false, true, EolMode::Lf);
        assert_eq!(out, r"\bcat");
    }

    #[test]
    fn test_dot_becomes_word_class_only_when_wrapped() {
        assert_eq!(
            translate_pattern("a.b", true, false, EolMode::Lf),
            r"\ba\wb\b"
        );
        assert_eq!(translate_pattern("a.b", false, false, EolMode::Lf), "a.b");
    }

    #[test]
    fn test_escaped_dot_survives_wrapping() {
        assert_eq!(
            translate_pattern(r"a\.b", true, false, EolMode::Lf),
            r"\ba\.b\b"
        );
    }

    #[test]
    fn test_word_boundary_shorthand() {
        assert_eq!(
            translate_pattern(r"\<cat", false, false, EolMode::Lf),
            r"(?<!\w)(?=\w)cat"
        );
        assert_eq!(
            translate_pattern(r"cat\>", false, false, EolMode::Lf),
            r"cat(?<=\w)(?!\w)"
        );
    }

    #[test]
    fn test_escaped_shorthand_stays_literal() {
        // 用户写的是字面量反斜杠加尖括号，不能被改写
        assert_eq!(
            translate_pattern(r"\\<cat", false, false, EolMode::Lf),
            r"\\<cat"
        );
        assert_eq!(
            translate_pattern(r"cat\\>", false, false, EolMode::Lf),
            r"cat\\>"
        );
    }

    #[test]
    fn test_cr_mode_rewrites_eol_anchor() {
        assert_eq!(
            translate_pattern("end$", false, false, EolMode::Cr),
            r"end(?=\r)"
        );
        // 转义过的 $ 保持字面量
        assert_eq!(
            translate_pattern(r"\$5", false, false, EolMode::Cr),
            r"\$5"
        );
    }

    #[test]
    fn test_lf_and_crlf_keep_eol_anchor() {
        assert_eq!(translate_pattern("end$", false, false, EolMode::Lf), "end$");
        assert_eq!(
            translate_pattern("end$", false, false, EolMode::CrLf),
            "end$"
        );
    }

    #[test]
    fn test_trailing_backslash_kept() {
        assert_eq!(
            translate_pattern("cat\\", false, false, EolMode::Lf),
            "cat\\"
        );
    }
}
