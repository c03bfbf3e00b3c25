/// 사용자가 입력한 문자열을 숫자로 읽는다.
///
/// 비어 있거나 숫자가 아니면 오류 대신 0을 돌려준다. 앞뒤 공백은 무시한다.
/// 소수점은 마침표만 인정하므로 `12,5`는 0이다. `nan`, `inf`처럼 유한하지 않은 값도 0으로 본다.
pub fn parse_or_zero(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
