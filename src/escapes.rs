//! 转义字符分类
//!
//! 替换模板解码与模式翻译共用的单字符分类函数，无状态

/// 是否为八进制数字
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

/// 十六进制数字的数值，非十六进制字符返回 None
pub fn hex_digit_value(ch: char) -> Option<u32> {
    ch.to_digit(16)
}
