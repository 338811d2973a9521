//! 四位验证码输入框
//!
//! 只维护数字与焦点位置，DOM 焦点由组件根据 `focus()` 同步。

pub const OTP_LEN: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    digits: [Option<char>; OTP_LEN],
    focus: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用完整验证码初始化（不合法时返回空输入）
    pub fn prefilled(code: &str) -> Self {
        let mut input = Self::new();
        input.paste(code);
        input
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// 某个格子的输入事件
    ///
    /// 取最后一个字符：数字则写入并前进焦点，空值清空该格，其他字符忽略。
    pub fn input(&mut self, index: usize, text: &str) {
        if index >= OTP_LEN {
            return;
        }
        match text.chars().last() {
            None => self.digits[index] = None,
            Some(ch) if ch.is_ascii_digit() => {
                self.digits[index] = Some(ch);
                self.focus = (index + 1).min(OTP_LEN - 1);
            }
            Some(_) => {}
        }
    }

    /// 退格：当前格为空时焦点后退一格
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LEN {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    /// 粘贴：恰好四位数字时逐格填入并聚焦最后一格，否则不做任何事
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.len() != OTP_LEN || !text.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        for (slot, ch) in self.digits.iter_mut().zip(text.chars()) {
            *slot = Some(ch);
        }
        self.focus = OTP_LEN - 1;
        true
    }

    pub fn value(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_advances_focus() {
        let mut otp = OtpInput::new();
        otp.input(0, "4");
        assert_eq!(otp.focus(), 1);
        otp.input(1, "x");
        assert_eq!(otp.digit(1), None);
        assert_eq!(otp.focus(), 1);

        otp.input(1, "8");
        otp.input(2, "2");
        otp.input(3, "1");
        assert_eq!(otp.focus(), 3);
        assert!(otp.is_complete());
        assert_eq!(otp.value(), "4821");
    }

    #[test]
    fn test_typing_over_a_filled_box_keeps_last_digit() {
        let mut otp = OtpInput::new();
        otp.input(0, "4");
        otp.input(0, "47");
        assert_eq!(otp.digit(0), Some('7'));
        assert_eq!(otp.focus(), 1);

        otp.input(0, "7x");
        assert_eq!(otp.digit(0), Some('7'));
    }

    #[test]
    fn test_backspace_on_empty_box_moves_back() {
        let mut otp = OtpInput::new();
        otp.input(0, "4");
        otp.backspace(1);
        assert_eq!(otp.focus(), 0);
        assert_eq!(otp.digit(0), Some('4'));

        otp.backspace(0);
        assert_eq!(otp.digit(0), None);
        otp.backspace(0);
        assert_eq!(otp.focus(), 0);
    }

    #[test]
    fn test_paste_distributes_exactly_four_digits() {
        let mut otp = OtpInput::new();
        assert!(otp.paste(" 0937 "));
        assert_eq!(otp.value(), "0937");
        assert_eq!(otp.focus(), 3);

        let mut otp = OtpInput::new();
        otp.input(0, "1");
        for bad in ["123", "12345", "12a4", ""] {
            assert!(!otp.paste(bad));
        }
        assert_eq!(otp.value(), "1");
        assert_eq!(otp.focus(), 1);
    }

    #[test]
    fn test_prefill_and_clear() {
        let mut otp = OtpInput::prefilled("4821");
        assert!(otp.is_complete());
        otp.clear();
        assert_eq!(otp, OtpInput::new());
        assert!(!OtpInput::prefilled("48").is_complete());
    }
}
