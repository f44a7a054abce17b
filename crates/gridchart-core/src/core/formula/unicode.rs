use super::elements::is_element_symbol;
use super::{FormulaError, FormulaFormatter};

const ADDUCT_DOT: char = '\u{00B7}';

fn subscript(digit: char) -> char {
    match digit {
        '0'..='9' => char::from_u32(0x2080 + digit as u32 - '0' as u32).unwrap_or(digit),
        other => other,
    }
}

fn superscript(c: char) -> char {
    match c {
        '1' => '\u{00B9}',
        '2' => '\u{00B2}',
        '3' => '\u{00B3}',
        '0' | '4'..='9' => char::from_u32(0x2070 + c as u32 - '0' as u32).unwrap_or(c),
        '+' => '\u{207A}',
        '-' => '\u{207B}',
        other => other,
    }
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Start,
    Element,
    Open,
    Close,
    Separator,
    Coefficient,
}

/// Renders sum formulas with unicode subscripts, superscript charges and adduct dots.
///
/// `C6H12O6` becomes `C₆H₁₂O₆`, `SO4^2-` becomes `SO₄²⁻` and `CuSO4*5H2O`
/// becomes `CuSO₄·5H₂O`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeFormula;

impl UnicodeFormula {
    pub fn new() -> Self {
        Self
    }

    fn render_charge(formula: &str, charge: &str) -> Result<String, FormulaError> {
        let invalid = || FormulaError::InvalidCharge {
            charge: charge.to_string(),
            formula: formula.to_string(),
        };
        let (sign, magnitude) = if let Some(rest) = charge.strip_suffix(['+', '-']) {
            (&charge[rest.len()..], rest)
        } else if let Some(rest) = charge.strip_prefix(['+', '-']) {
            (&charge[..1], rest)
        } else {
            return Err(invalid());
        };
        if !magnitude.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(magnitude.chars().chain(sign.chars()).map(superscript).collect())
    }
}

impl FormulaFormatter for UnicodeFormula {
    fn to_unicode(&self, formula: &str) -> Result<String, FormulaError> {
        let compact: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
        let mut out = String::with_capacity(compact.len() * 2);
        let mut brackets: Vec<char> = Vec::new();
        let mut last = Token::Start;
        let mut i = 0;

        while i < compact.len() {
            let c = compact[i];
            match c {
                'A'..='Z' => {
                    let mut end = i + 1;
                    while end < compact.len() && compact[end].is_ascii_lowercase() {
                        end += 1;
                    }
                    let symbol: String = compact[i..end].iter().collect();
                    if !is_element_symbol(&symbol) {
                        return Err(FormulaError::UnknownElement {
                            symbol,
                            formula: formula.to_string(),
                        });
                    }
                    out.push_str(&symbol);
                    last = Token::Element;
                    i = end;
                    continue;
                }
                '0'..='9' => {
                    let mut end = i;
                    while end < compact.len() && compact[end].is_ascii_digit() {
                        end += 1;
                    }
                    let as_count = matches!(last, Token::Element | Token::Close);
                    for &d in &compact[i..end] {
                        out.push(if as_count { subscript(d) } else { d });
                    }
                    if !as_count {
                        last = Token::Coefficient;
                    }
                    i = end;
                    continue;
                }
                '(' | '[' | '{' => {
                    brackets.push(c);
                    out.push(c);
                    last = Token::Open;
                }
                ')' | ']' | '}' => match brackets.pop() {
                    Some(open) if closing_for(open) == c => {
                        out.push(c);
                        last = Token::Close;
                    }
                    _ => return Err(FormulaError::UnbalancedBracket(formula.to_string())),
                },
                '.' | '*' | ADDUCT_DOT => {
                    out.push(ADDUCT_DOT);
                    last = Token::Separator;
                }
                '^' => {
                    let charge: String = compact[i + 1..].iter().collect();
                    out.push_str(&Self::render_charge(formula, &charge)?);
                    i = compact.len();
                    continue;
                }
                '+' | '-' if i + 1 == compact.len() => {
                    out.push(superscript(c));
                }
                other => {
                    return Err(FormulaError::InvalidCharacter {
                        character: other,
                        formula: formula.to_string(),
                    });
                }
            }
            i += 1;
        }

        if !brackets.is_empty() {
            return Err(FormulaError::UnbalancedBracket(formula.to_string()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(formula: &str) -> Result<String, FormulaError> {
        UnicodeFormula::new().to_unicode(formula)
    }

    #[test]
    fn counts_after_elements_become_subscripts() {
        assert_eq!(render("H2O").unwrap(), "H₂O");
        assert_eq!(render("C6H12O6").unwrap(), "C₆H₁₂O₆");
        assert_eq!(render("C3H7NO2S").unwrap(), "C₃H₇NO₂S");
    }

    #[test]
    fn counts_after_closing_brackets_become_subscripts() {
        assert_eq!(render("Ca(OH)2").unwrap(), "Ca(OH)₂");
        assert_eq!(render("[Fe(CN)6]").unwrap(), "[Fe(CN)₆]");
    }

    #[test]
    fn adducts_use_a_middle_dot_and_keep_coefficients_normal() {
        assert_eq!(render("CuSO4*5H2O").unwrap(), "CuSO₄·5H₂O");
        assert_eq!(render("CaCl2 . 2 H2O").unwrap(), "CaCl₂·2H₂O");
        assert_eq!(render("2H2O").unwrap(), "2H₂O");
    }

    #[test]
    fn charges_become_superscripts() {
        assert_eq!(render("SO4^2-").unwrap(), "SO₄²⁻");
        assert_eq!(render("Na^+").unwrap(), "Na⁺");
        assert_eq!(render("NH4+").unwrap(), "NH₄⁺");
        assert_eq!(render("Fe^3+").unwrap(), "Fe³⁺");
    }

    #[test]
    fn whitespace_is_ignored_and_empty_input_is_empty() {
        assert_eq!(render(" C O2 ").unwrap(), "CO₂");
        assert_eq!(render("").unwrap(), "");
        assert_eq!(render("   ").unwrap(), "");
    }

    #[test]
    fn unknown_elements_are_rejected() {
        assert_eq!(
            render("RCH2").unwrap_err(),
            FormulaError::UnknownElement {
                symbol: "R".into(),
                formula: "RCH2".into()
            }
        );
        assert!(matches!(
            render("Xx2"),
            Err(FormulaError::UnknownElement { .. })
        ));
    }

    #[test]
    fn unbalanced_brackets_are_rejected() {
        assert!(matches!(
            render("Ca(OH2"),
            Err(FormulaError::UnbalancedBracket(_))
        ));
        assert!(matches!(
            render("Ca(OH]2"),
            Err(FormulaError::UnbalancedBracket(_))
        ));
        assert!(matches!(render("OH)"), Err(FormulaError::UnbalancedBracket(_))));
    }

    #[test]
    fn malformed_charges_and_stray_characters_are_rejected() {
        assert!(matches!(
            render("SO4^2"),
            Err(FormulaError::InvalidCharge { .. })
        ));
        assert!(matches!(
            render("H-O"),
            Err(FormulaError::InvalidCharacter { character: '-', .. })
        ));
        assert!(matches!(
            render("h2o"),
            Err(FormulaError::InvalidCharacter { character: 'h', .. })
        ));
    }
}
