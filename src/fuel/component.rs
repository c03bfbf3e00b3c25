use serde::{Deserialize, Serialize};
use std::fmt;

/// 조성표에 등장하는 성분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Hydrogen,
    Carbon,
    Sulfur,
    Nitrogen,
    Oxygen,
    /// 회분. 가연 질량 기준에서는 정의상 0이므로 건조 질량까지만 등장한다.
    Ash,
    /// 바나듐. 다른 성분과 달리 mg/kg 단위로 다룬다.
    Vanadium,
}

impl Element {
    /// 화학 기호(회분은 A).
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Hydrogen => "H",
            Element::Carbon => "C",
            Element::Sulfur => "S",
            Element::Nitrogen => "N",
            Element::Oxygen => "O",
            Element::Ash => "A",
            Element::Vanadium => "V",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Element::Hydrogen => "Hydrogen",
            Element::Carbon => "Carbon",
            Element::Sulfur => "Sulfur",
            Element::Nitrogen => "Nitrogen",
            Element::Oxygen => "Oxygen",
            Element::Ash => "Ash",
            Element::Vanadium => "Vanadium",
        }
    }
}

/// 조성 기준 질량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassBasis {
    /// 작업 질량(수분·회분 포함, 입하 상태)
    Working,
    /// 건조 질량(수분 제외)
    Dry,
    /// 가연 질량(수분·회분 제외)
    Combustible,
}

impl MassBasis {
    /// 위첨자 표기. 연료공학 관용 표기(P=작업, C=건조, Г=가연)를 그대로 따른다.
    pub fn mark(&self) -> &'static str {
        match self {
            MassBasis::Working => "P",
            MassBasis::Dry => "C",
            MassBasis::Combustible => "Г",
        }
    }
}

impl fmt::Display for MassBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MassBasis::Working => write!(f, "작업 질량"),
            MassBasis::Dry => write!(f, "건조 질량"),
            MassBasis::Combustible => write!(f, "가연 질량"),
        }
    }
}

/// `H^C`, `S^Г` 형태의 성분 라벨을 만든다.
pub fn label(element: Element, basis: MassBasis) -> String {
    format!("{}^{}", element.symbol(), basis.mark())
}

/// `from` 기준 값을 `to` 기준으로 옮기는 환산 계수 라벨(`K^PC`, `K^PГ`).
pub fn coefficient_label(from: MassBasis, to: MassBasis) -> String {
    format!("K^{}{}", from.mark(), to.mark())
}

/// 특정 기준 질량에서의 성분별 값 목록.
///
/// 삽입 순서가 곧 표시 순서이므로 맵 대신 순서 있는 목록으로 보관한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub basis: MassBasis,
    entries: Vec<(Element, f64)>,
}

impl Composition {
    pub fn new(basis: MassBasis) -> Self {
        Self {
            basis,
            entries: Vec::new(),
        }
    }

    /// 성분을 뒤에 추가한다. 같은 성분이 이미 있으면 값을 덮어쓴다.
    pub fn with(mut self, element: Element, value: f64) -> Self {
        if let Some(slot) = self.entries.iter_mut().find(|(e, _)| *e == element) {
            slot.1 = value;
        } else {
            self.entries.push((element, value));
        }
        self
    }

    pub fn get(&self, element: Element) -> Option<f64> {
        self.entries
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.entries.iter().map(|(e, _)| *e)
    }

    /// (라벨, 값) 쌍으로 순회한다.
    pub fn labeled(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.entries
            .iter()
            .map(move |(e, v)| (label(*e, self.basis), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_basis_marks() {
        assert_eq!(label(Element::Hydrogen, MassBasis::Dry), "H^C");
        assert_eq!(label(Element::Sulfur, MassBasis::Combustible), "S^Г");
        assert_eq!(label(Element::Vanadium, MassBasis::Working), "V^P");
    }

    #[test]
    fn coefficient_labels_use_the_same_marks() {
        assert_eq!(coefficient_label(MassBasis::Working, MassBasis::Dry), "K^PC");
        assert_eq!(coefficient_label(MassBasis::Working, MassBasis::Combustible), "K^PГ");
        // P와 C는 라틴 문자, Г만 키릴 문자
        assert!(MassBasis::Working.mark().is_ascii());
        assert!(MassBasis::Dry.mark().is_ascii());
        assert_eq!(coefficient_label(MassBasis::Working, MassBasis::Dry).chars().count(), 4);
    }

    #[test]
    fn composition_keeps_insertion_order_and_overwrites() {
        let comp = Composition::new(MassBasis::Working)
            .with(Element::Carbon, 80.0)
            .with(Element::Hydrogen, 10.0)
            .with(Element::Carbon, 81.0);
        let order: Vec<_> = comp.elements().collect();
        assert_eq!(order, vec![Element::Carbon, Element::Hydrogen]);
        assert_eq!(comp.get(Element::Carbon), Some(81.0));
        assert_eq!(comp.get(Element::Ash), None);
        assert_eq!(comp.len(), 2);
    }

    #[test]
    fn labeled_iterates_with_basis_labels() {
        let comp = Composition::new(MassBasis::Dry).with(Element::Ash, 5.0);
        let rows: Vec<_> = comp.labeled().collect();
        assert_eq!(rows, vec![("A^C".to_string(), 5.0)]);
    }
}
