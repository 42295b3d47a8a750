use bumpalo::Bump;
use hashbrown::HashMap;
use pretty_assertions::assert_eq;

use super::parser::{Parser, parse, parse_with_max_depth};
use super::{Expr, Literal, ParseErrorKind, Span};
use crate::symbols::SymbolTables;

fn ast(source: &str) -> String {
    let arena = Bump::new();
    parse(&arena, source, SymbolTables::standard())
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e))
        .to_string()
}

fn error_kind(source: &str) -> ParseErrorKind {
    let arena = Bump::new();
    match parse(&arena, source, SymbolTables::standard()) {
        Ok(expr) => panic!("Expected {:?} to fail, got {}", source, expr),
        Err(e) => e.kind,
    }
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    let arena = Bump::new();
    let symbols = SymbolTables::standard();
    assert!(matches!(
        parse(&arena, "42", symbols).unwrap(),
        Expr::Literal(Literal::Integer(42))
    ));
    assert!(matches!(
        parse(&arena, "2.5", symbols).unwrap(),
        Expr::Literal(Literal::Float(v)) if *v == 2.5
    ));
    assert!(matches!(
        parse(&arena, ".5", symbols).unwrap(),
        Expr::Literal(Literal::Float(v)) if *v == 0.5
    ));
    assert_eq!(ast("-3"), "(- 3)");
}

#[test]
fn test_empty_text_is_null() {
    assert_eq!(ast(""), "null");
    assert_eq!(ast("   "), "null");
    assert_eq!(ast(" , ,"), "null");
}

#[test]
fn test_trailing_commas_are_ignored() {
    assert_eq!(ast("time > 3 ,, "), ast("time > 3"));
}

#[test]
fn test_strings() {
    assert_eq!(ast("\"holdfwd\""), "\"holdfwd\"");
    assert_eq!(ast("\"a + b\""), "\"a + b\"");
}

#[test]
fn test_command_rewriting() {
    let arena = Bump::new();
    let mut commands: HashMap<String, u32> = HashMap::new();
    commands.insert("QCF_x".to_string(), 7);

    let parser = Parser::new(&arena, SymbolTables::standard()).with_commands(&commands);
    assert_eq!(
        parser.parse("command = \"QCF_x\"").unwrap().to_string(),
        "(= 'command command#7(\"QCF_x\"))"
    );
    assert_eq!(
        parser.parse("command = \"unknown\"").unwrap().to_string(),
        "(= 'command \"unknown\")"
    );
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_variables_are_bound() {
    assert_eq!(ast("Life"), "life");
    assert_eq!(ast("Pos  X"), "pos x");
    assert_eq!(ast("StateType"), "statetype");
}

#[test]
fn test_unknown_names_stay_raw() {
    assert_eq!(ast("XyZzy"), "'xyzzy");
    assert_eq!(ast("const(Size.Ground.Front)"), "(const 'size.ground.front)");
}

#[test]
fn test_arrays() {
    assert_eq!(ast("var(3)"), "(var 3)");
    assert_eq!(ast("IfElse(1, 2, 3)"), "(ifelse (, 1 (, 2 3)))");
    assert_eq!(ast("abs(-2) * 3"), "(* (abs (- 2)) 3)");
}

#[test]
fn test_unknown_array_is_unbound() {
    assert_eq!(ast("frobnicate(1)"), "(frobnicate? 1)");
}

// ============================================================================
// Commas
// ============================================================================

#[test]
fn test_redirect_comma() {
    assert_eq!(ast("p2, life"), "(, 'p2 life)");
    assert_eq!(ast("p2, life > 100"), "(> (, 'p2 life) 100)");
    assert_eq!(
        ast("helper(3), var(1) = 2"),
        "(= (, (helper 3) (var 1)) 2)"
    );
    assert_eq!(
        ast("p2, life > 100 && time > 3"),
        "(&& (> (, 'p2 life) 100) (> time 3))"
    );
    assert_eq!(ast("enemynear 1, life"), "(, 'enemynear 1 life)");
}

#[test]
fn test_list_comparisons_keep_their_commas() {
    assert_eq!(ast("animelem = 3, 2"), "(= 'animelem (, 3 2))");
    assert_eq!(
        ast("AnimElem = 3, >= 2"),
        "(= 'animelem (, 3 (arg >= 2)))"
    );
    assert_eq!(ast("timemod = 4, 1"), "(= 'timemod (, 4 1))");
    assert_eq!(
        ast("time > 3 && animelem = 2, 1"),
        "(&& (> time 3) (= 'animelem (, 2 1)))"
    );
    assert_eq!(
        ast("hitdefattr = SC, NA, SP"),
        "(= 'hitdefattr (, 'sc (, 'na 'sp)))"
    );
    assert_eq!(ast("projhit1200 = 1, < 5"), "(= 'projhit1200 (, 1 (arg < 5)))");
}

#[test]
fn test_context_free_comma() {
    assert_eq!(ast("1 , 2"), "(, 1 2)");
    assert_eq!(ast("var(1) = 2, 3"), "(, (= (var 1) 2) 3)");
}

#[test]
fn test_names_starting_with_redirect_words() {
    assert_eq!(
        ast("ifelse(life > p2life, 1, 2)"),
        "(ifelse (, (> life p2life) (, 1 2)))"
    );
    assert_eq!(
        ast("cond(p2stateno = 0, 1, 2)"),
        "(cond (, (= p2stateno 0) (, 1 2)))"
    );
    assert_eq!(ast("p1name, 1"), "(, p1name 1)");
    assert_eq!(ast("rootdist x, parentdist y"), "(, rootdist x parentdist y)");
    assert_eq!(ast("enemynear(1), life"), "(, (enemynear 1) life)");
    assert_eq!(ast("helper (3), life"), "(, (helper 3) life)");
}

#[test]
fn test_arrays_starting_with_list_comparisons() {
    assert_eq!(
        ast("ifelse(animelemno(0) = 1, 1, 2)"),
        "(ifelse (, (= (animelemno 0) 1) (, 1 2)))"
    );
    assert_eq!(
        ast("ifelse(projhittime(1) = 0, 1, 2)"),
        "(ifelse (, (= (projhittime 1) 0) (, 1 2)))"
    );
    assert_eq!(
        ast("cond(animelemtime(1) = 0, 1, 2)"),
        "(cond (, (= (animelemtime 1) 0) (, 1 2)))"
    );
    assert_eq!(ast("projguarded = 1, 2"), "(= 'projguarded (, 1 2))");
}

// ============================================================================
// Brackets and ranges
// ============================================================================

#[test]
fn test_ranges() {
    assert_eq!(ast("[1, 10]"), "(range [ (, 1 10) ])");
    assert_eq!(ast("[1, 10)"), "(range [ (, 1 10) ))");
    assert_eq!(ast("(1, 10]"), "(range ( (, 1 10) ])");
    assert_eq!(ast("(1, 10)"), "(range ( (, 1 10) ))");
    assert_eq!(
        ast("stateno = [200, 299] && time > 1"),
        "(&& (= stateno (range [ (, 200 299) ])) (> time 1))"
    );
    assert_eq!(
        ast("var(1) = [1, 10) && ctrl"),
        "(&& (= (var 1) (range [ (, 1 10) ))) ctrl)"
    );
}

#[test]
fn test_parentheses() {
    assert_eq!(ast("((1))"), "1");
    assert_eq!(ast("(p2, life)"), "(, 'p2 life)");
    assert_eq!(ast("(1) + (2)"), "(+ 1 2)");
}

#[test]
fn test_operator_arguments() {
    assert_eq!(ast(">= 3"), "(arg >= 3)");
    assert_eq!(ast("!= 3"), "(arg != 3)");
    assert_eq!(ast("< -1"), "(arg < (- 1))");
}

#[test]
fn test_assignment() {
    assert_eq!(ast("var(0) := 5"), "(:= (var 0) 5)");
    assert_eq!(
        ast("0 && (var(0) := 1)"),
        "(&& 0 (:= (var 0) 1))"
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unbalanced_brackets() {
    assert_eq!(error_kind("(1 + 2"), ParseErrorKind::UnbalancedBrackets { bracket: '(' });
    assert_eq!(error_kind("1 + 2)"), ParseErrorKind::UnbalancedBrackets { bracket: ')' });
    assert_eq!(error_kind("var(1]]"), ParseErrorKind::UnbalancedBrackets { bracket: ']' });
}

#[test]
fn test_unterminated_string() {
    assert_eq!(error_kind("command = \"x"), ParseErrorKind::UnterminatedString);
}

#[test]
fn test_missing_operands() {
    assert_eq!(
        error_kind("1 *"),
        ParseErrorKind::MissingOperand {
            operator: "*".to_string()
        }
    );
    assert_eq!(
        error_kind("&& time"),
        ParseErrorKind::MissingOperand {
            operator: "&&".to_string()
        }
    );
    assert_eq!(
        error_kind("time ="),
        ParseErrorKind::MissingOperand {
            operator: "=".to_string()
        }
    );
    assert_eq!(
        error_kind("!"),
        ParseErrorKind::MissingOperand {
            operator: "!".to_string()
        }
    );
}

#[test]
fn test_invalid_number() {
    assert_eq!(
        error_kind("1.2.3"),
        ParseErrorKind::InvalidNumber {
            text: "1.2.3".to_string()
        }
    );
}

#[test]
fn test_error_span_points_into_source() {
    let arena = Bump::new();
    let err = parse(&arena, "time > 3 && 1.2.3", SymbolTables::standard()).unwrap_err();
    assert_eq!(err.span, Span::new(12, 17));
    assert_eq!(err.span.str_of(&err.source), "1.2.3");
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("P004"));
}

#[test]
fn test_max_depth() {
    let arena = Bump::new();
    let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    let err = parse_with_max_depth(&arena, &source, SymbolTables::standard(), 10).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::MaxDepthExceeded { max_depth: 10, .. }
    ));
    assert!(parse_with_max_depth(&arena, &source, SymbolTables::standard(), 30).is_ok());
}
