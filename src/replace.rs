//! 替换模板解码与展开
//!
//! 两阶段设计：先把模板的转义序列归一化（`\N` → `$N`、控制字符、
//! 数字转义），再从左到右展开反向引用。展开阶段不会把自己的输出
//! 再当作转义语法解读。解码永远不会失败，畸形转义退化为字面量。

use std::ops::Range;

use memchr::memchr2;

use crate::escapes::hex_digit_value;

/// 解码替换模板的转义序列
///
/// - `\1`..`\9` 改写为 `$N` 反向引用标记
/// - `\a \b \f \n \r \t \v` 变成对应控制字符
/// - `\\` 保留为两个字符，留给展开阶段识别
/// - `\xHH`（1–2 位）/ `\uHHHH`（1–4 位）按码点解码；
///   没有十六进制数字或码点非法时退化为转义字母本身
/// - 其余 `\c` 输出字面量 `c`，末尾孤立的 `\` 输出字面量反斜杠
pub fn decode_replacement(template: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch != '\\' {
            out.push(ch);
            i += 1;
            continue;
        }

        i += 1;
        let esc = match chars.get(i) {
            Some(&esc) => esc,
            None => {
                out.push('\\');
                break;
            }
        };

        match esc {
            // 旧版替换语法兼容：\<n> 等价于 $<n>
            '1'..='9' => {
                out.push('$');
                out.push(esc);
            }
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '\\' => out.push_str(r"\\"),
            'x' | 'u' => {
                let max_digits = if esc == 'x' { 2 } else { 4 };
                let mut value: u32 = 0;
                let mut ndigits = 0;
                while ndigits < max_digits {
                    match chars.get(i + 1).copied().and_then(hex_digit_value) {
                        Some(d) => {
                            value = value * 16 + d;
                            i += 1;
                            ndigits += 1;
                        }
                        None => break,
                    }
                }
                if ndigits == 0 {
                    out.push(esc);
                } else {
                    match char::from_u32(value) {
                        Some(c) => out.push(c),
                        None => out.push(esc),
                    }
                }
            }
            other => out.push(other),
        }
        i += 1;
    }

    out
}

/// 展开解码后的模板
///
/// `$` 或 `\` 后跟数字时按组号从文档复制捕获跨度；
/// 组号超界或组未参与匹配时什么都不输出（标记与数字照样消耗）。
/// `\` 后不是数字时输出单个反斜杠并吞掉被转义的字符，
/// 正好把解码阶段保留的 `\\` 折叠回一个。
pub fn expand_replacement(decoded: &str, text: &str, groups: &[Option<Range<usize>>]) -> String {
    let bytes = decoded.as_bytes();
    let mut out = String::with_capacity(decoded.len());
    let mut pos = 0;

    while let Some(off) = memchr2(b'$', b'\\', &bytes[pos..]) {
        let at = pos + off;
        out.push_str(&decoded[pos..at]);

        match bytes.get(at + 1) {
            Some(&d) if d.is_ascii_digit() => {
                let idx = (d - b'0') as usize;
                if let Some(Some(span)) = groups.get(idx) {
                    out.push_str(&text[span.clone()]);
                }
                pos = at + 2;
            }
            Some(_) if bytes[at] == b'\\' => {
                out.push('\\');
                // 吞掉整个被转义的字符
                let skip = decoded[at + 1..].chars().next().map_or(0, char::len_utf8);
                pos = at + 1 + skip;
            }
            None if bytes[at] == b'\\' => {
                out.push('\\');
                pos = at + 1;
            }
            _ => {
                out.push('$');
                pos = at + 1;
            }
        }
    }

    out.push_str(&decoded[pos..]);
    out
}
