// Hoopla - lexical and semantic checking for the Hoop teaching language.
// Copyright (C) 2025 The Hoopla Authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::{
    identifier::Error as IdError,
    syntax::{AccessModifier, DataType},
};

use super::{Checker, ConditionalState, SemanticError, check};

#[track_caller]
fn check_errors(input: &str, expected: &[(usize, SemanticError)]) {
    let errors = check(input).semantic_errors();

    if errors != expected {
        for (line, error) in &errors {
            println!("({line}, {error:?}),");
        }

        eprintln!("diagnostics differ from expected:");
        let difference = diff::slice(expected, &errors);
        for result in difference {
            match result {
                diff::Result::Left(left) => eprintln!("-{left:?}"),
                diff::Result::Both(left, _right) => eprintln!(" {left:?}"),
                diff::Result::Right(right) => eprintln!("+{right:?}"),
            }
        }
        panic!();
    }
}

fn s(s: &str) -> String {
    String::from(s)
}

#[test]
fn redeclaration() {
    check_errors(
        "int a = 1\nint a = 1",
        &[(2, SemanticError::Redeclared { name: s("a") })],
    );

    // Constants and arrays share the scope with variables.
    check_errors(
        "int a = 1\nfix int a = 2\nint b = 3\nbool b = [true]",
        &[
            (2, SemanticError::Redeclared { name: s("a") }),
            (4, SemanticError::Redeclared { name: s("b") }),
        ],
    );
}

#[test]
fn constant_reassignment() {
    check_errors(
        "fix int a = 25\na = 70",
        &[(2, SemanticError::ConstantReassigned { name: s("a") })],
    );
    check_errors("fix int a = 25\na=70\n// a = 70\nb = 70\na += 1", &[]);
}

#[test]
fn array_bounds() {
    check_errors(
        "only bool var = [true,false]\nx = var[2]",
        &[(
            2,
            SemanticError::IndexOutOfBounds {
                array: s("var"),
                index: s("2"),
            },
        )],
    );
    check_errors("only bool var = [true,false]\nx = var[1]", &[]);
    check_errors(
        "bool var = [true]\nx = var[0] + var [1] + other[9] + var[3]",
        &[
            (
                2,
                SemanticError::IndexOutOfBounds {
                    array: s("var"),
                    index: s("1"),
                },
            ),
            (
                2,
                SemanticError::IndexOutOfBounds {
                    array: s("var"),
                    index: s("3"),
                },
            ),
        ],
    );
}

#[test]
fn array_elements() {
    check_errors(
        "int nums = [1, 2.5, , x]",
        &[
            (
                1,
                SemanticError::InvalidValue {
                    value: s("2.5"),
                    data_type: DataType::Int,
                },
            ),
            (
                1,
                SemanticError::InvalidValue {
                    value: s("x"),
                    data_type: DataType::Int,
                },
            ),
        ],
    );
    check_errors(
        "string names = []\nx = names[0]",
        &[(
            2,
            SemanticError::IndexOutOfBounds {
                array: s("names"),
                index: s("0"),
            },
        )],
    );
}

#[test]
fn duplicate_case() {
    check_errors(
        "int x = 1\nswitch(x){\ncase 5:\ncase 10:\ncase 5:\n}",
        &[(5, SemanticError::DuplicateCase { value: s("5") })],
    );

    // A new switch forgets earlier cases.
    check_errors(
        "int x = 1\nswitch (x) {\ncase 5:\n}\nswitch (x) {\ncase 5:\n}",
        &[],
    );
}

#[test]
fn switch_errors() {
    check_errors(
        "case 5:",
        &[(1, SemanticError::CaseWithoutSwitch { value: s("5") })],
    );
    check_errors(
        "switch (y) {\ncase \"a\":\ncase \"a\":",
        &[
            (1, SemanticError::SwitchUndeclared { name: s("y") }),
            (3, SemanticError::DuplicateCase { value: s("\"a\"") }),
        ],
    );
}

#[test]
fn missing_return() {
    check_errors(
        "func f() int {\n}",
        &[(2, SemanticError::MissingReturn { function: s("f") })],
    );
    check_errors(
        "func f() int {\nyield 1.5\n}",
        &[
            (
                2,
                SemanticError::InvalidReturnValue {
                    value: s("1.5"),
                    data_type: DataType::Int,
                },
            ),
            (3, SemanticError::MissingReturn { function: s("f") }),
        ],
    );
    check_errors("func f() double {\n    return 1.5\n}", &[]);

    // Every `}` reports every function still missing a return.
    check_errors(
        "func f() bool {\nWhen x > 1 {\n}\n}",
        &[
            (2, SemanticError::Undeclared { name: s("x") }),
            (3, SemanticError::MissingOtherwise),
            (3, SemanticError::MissingReturn { function: s("f") }),
            (4, SemanticError::MissingReturn { function: s("f") }),
        ],
    );

    // Parentheses after the opening brace are not part of the header.
    check_errors(
        "func f() int { // returns max(a, b)\n}",
        &[(2, SemanticError::MissingReturn { function: s("f") })],
    );
    check_errors(
        "func f() int { // max(a, b)\nyield 1\n}\nfunc f() {\n}",
        &[(4, SemanticError::FunctionRedeclared { name: s("f") })],
    );
}

#[test]
fn unreturned_void_function_stays_current() {
    // Returns go to the first function without a valid return, even a void
    // function whose body has already ended.
    check_errors(
        "func a() {\n}\nfunc b() int {\nyield 1\n}",
        &[
            (4, SemanticError::VoidReturn),
            (5, SemanticError::MissingReturn { function: s("b") }),
        ],
    );
    check_errors("func a() {\nreturn\n}\nfunc b() int {\nyield 1\n}", &[]);
}

#[test]
fn returns() {
    check_errors(
        "func f() {\nyield 5\n}",
        &[(2, SemanticError::VoidReturn)],
    );
    check_errors(
        "func f() int {\nreturn\n}",
        &[
            (
                2,
                SemanticError::MissingReturnValue {
                    function: s("f"),
                    return_type: DataType::Int,
                },
            ),
            (3, SemanticError::MissingReturn { function: s("f") }),
        ],
    );

    // Returns go to the first function that has not returned yet, not to
    // the enclosing one.
    check_errors(
        "func f() int {\nfunc g() string {\nyield 1\nyield \"s\"\n}",
        &[],
    );
    check_errors(
        "func f() int {\nfunc g() string {\nyield \"s\"\nyield 1\n}",
        &[
            (
                3,
                SemanticError::InvalidReturnValue {
                    value: s("\"s\""),
                    data_type: DataType::Int,
                },
            ),
            (5, SemanticError::MissingReturn { function: s("g") }),
        ],
    );

    // A return with no function is ignored.
    check_errors("yield 5", &[]);
}

#[test]
fn function_redeclared() {
    check_errors(
        "func f() int {\nyield 1\n}\nFunc f(string s) {\n}",
        &[(4, SemanticError::FunctionRedeclared { name: s("f") })],
    );
}

#[test]
fn naming() {
    check_errors(
        "int 1x = 5\nfunc my_func() {\nclass café {",
        &[
            (
                1,
                SemanticError::InvalidIdentifier {
                    name: s("1x"),
                    reason: IdError::BadFirstCharacter {
                        string: s("1x"),
                        c: '1',
                    },
                },
            ),
            (
                2,
                SemanticError::InvalidIdentifier {
                    name: s("my_func"),
                    reason: IdError::BadLaterCharacter {
                        string: s("my_func"),
                        c: '_',
                    },
                },
            ),
            (
                3,
                SemanticError::InvalidIdentifier {
                    name: s("café"),
                    reason: IdError::BadLaterCharacter {
                        string: s("café"),
                        c: 'é',
                    },
                },
            ),
        ],
    );
}

#[test]
fn values() {
    check_errors(
        "double b = 100\nbool c = 1\nstring d = 5\nint e = 2.5\ndouble f = 2.5\nstring g = \"ss\"",
        &[
            (
                1,
                SemanticError::InvalidValue {
                    value: s("100"),
                    data_type: DataType::Double,
                },
            ),
            (
                2,
                SemanticError::InvalidValue {
                    value: s("1"),
                    data_type: DataType::Bool,
                },
            ),
            (
                3,
                SemanticError::InvalidValue {
                    value: s("5"),
                    data_type: DataType::String,
                },
            ),
            (
                4,
                SemanticError::InvalidValue {
                    value: s("2.5"),
                    data_type: DataType::Int,
                },
            ),
        ],
    );
}

#[test]
fn access_modifiers() {
    check_errors(
        "only When x > 1 {\npackage x = 5\nall\nfamily int y = 2\nall fix int z = 3\nonly func f() {\nonly class A {\nonly abstract talk() {",
        &[
            (
                1,
                SemanticError::MisusedModifier {
                    modifier: AccessModifier::Only,
                },
            ),
            (
                2,
                SemanticError::MisusedModifier {
                    modifier: AccessModifier::Package,
                },
            ),
            (
                3,
                SemanticError::MisusedModifier {
                    modifier: AccessModifier::All,
                },
            ),
        ],
    );
}

#[test]
fn conditionals() {
    check_errors(
        "int b = 1\nWhen b < 10 {\nthen b > 10 {\nthen b > 20 {\notherwise {\n}",
        &[],
    );
    check_errors(
        "int b = 1\nWhen b < 10 {\n}",
        &[(3, SemanticError::MissingOtherwise)],
    );
    check_errors(
        "int b = 1\nwhen b < 1 {\nWhen b < 2 {\notherwise {",
        &[(3, SemanticError::WhenInOpenConditional)],
    );
    check_errors(
        "then b > 1 {\notherwise {",
        &[
            (1, SemanticError::ThenWithoutWhen),
            (2, SemanticError::OtherwiseWithoutWhen),
        ],
    );

    // `}` closes the sequence, so a `then` after the `when` body is out of
    // place.
    check_errors(
        "int b = 1\nWhen b < 10 {\n}\nthen b > 10 {\n}\notherwise {\n}",
        &[
            (3, SemanticError::MissingOtherwise),
            (4, SemanticError::ThenWithoutWhen),
            (6, SemanticError::OtherwiseWithoutWhen),
        ],
    );
}

#[test]
fn conditional_state() {
    let mut checker = Checker::new();
    checker.check("int b = 1\nWhen b < 10 {\nthen b > 1 {");
    assert_eq!(checker.conditional_state(), ConditionalState::SawThen);
    checker.check("int b = 1\nWhen b < 10 {\notherwise {");
    assert_eq!(checker.conditional_state(), ConditionalState::SawOtherwise);
    checker.check("");
    assert_eq!(checker.conditional_state(), ConditionalState::Idle);
}

#[test]
fn loops() {
    check_errors(
        "hoop (i … 10, steps: 2) {\nwhile (j … 10) {",
        &[
            (1, SemanticError::Undeclared { name: s("i") }),
            (2, SemanticError::Undeclared { name: s("j") }),
        ],
    );
    check_errors(
        "int i = 0\nfix int j = 1\nhoop (i … 10, steps: 2) {\n}\nwhile (j … 10) {\n}",
        &[],
    );
}

#[test]
fn abstract_classes() {
    check_errors(
        "abstract class Animal {\n    abstract all talk(string pet = \"cat\") {\n    }\n}",
        &[(
            3,
            SemanticError::UnimplementedAbstractMethod {
                class: s("Animal"),
                method: s("abstract all talk(string pet = \"cat\") {"),
            },
        )],
    );

    // Abstract methods only count inside an abstract class.
    check_errors(
        "class Dog inherit Animal {\nabstract all talk() {\n}\n}",
        &[],
    );

    check_errors(
        "abstract class Animal {\nabstract talk() { // (todo)\n}",
        &[(
            3,
            SemanticError::UnimplementedAbstractMethod {
                class: s("Animal"),
                method: s("abstract talk() {"),
            },
        )],
    );
}

#[test]
fn class_redeclared() {
    check_errors(
        "class Dog {\n}\nonly class Dog inherit Animal {\n}\nabstract class Dog {\n}",
        &[
            (3, SemanticError::ClassRedeclared { name: s("Dog") }),
            (5, SemanticError::AbstractClassRedeclared { name: s("Dog") }),
        ],
    );
}

#[test]
fn registry_contents() {
    let mut checker = Checker::new();
    checker.check("class Dog inherit Animal {\nfix string name = \"Rex\"\n}");
    let registry = checker.registry();
    assert_eq!(
        registry.class("Dog").and_then(|class| class.parent.as_deref()),
        Some("Animal")
    );
    assert_eq!(registry.current_class(), None);
    assert_eq!(registry.type_of("name"), Some(DataType::String));
    assert!(registry.is_constant("name"));
}

#[test]
fn line_ends() {
    let redeclared = [(2, SemanticError::Redeclared { name: s("a") })];
    check_errors("int a = 1\nint a = 1", &redeclared);
    check_errors("int a = 1\r\nint a = 1", &redeclared);
    check_errors("int a = 1\rint a = 1", &redeclared);
    check_errors(
        "int a = 1\r\rWhen a < 2 {\r}",
        &[(4, SemanticError::MissingOtherwise)],
    );
}

#[test]
fn idempotent() {
    let clean = "int a = 1\nfix double b = 2.5\nfunc f() int {\nyield 1\n}\nclass A {\n}";
    let mut checker = Checker::new();
    assert!(checker.check(clean).is_empty());
    assert!(checker.check(clean).is_empty());

    let dirty = "int a = 1\nint a = 2\nabstract class A {\nabstract t() {\n}";
    let first = checker.check(dirty);
    assert_eq!(first.len(), 2);
    assert_eq!(first, checker.check(dirty));
}

#[test]
fn rendering() {
    let diagnostics = check("fix int a = 25\na = 70");
    assert_eq!(
        diagnostics
            .iter()
            .map(|diagnostic| diagnostic.to_string())
            .collect::<Vec<_>>(),
        vec![String::from(
            "Semantic Error: Line 2 - Cannot reassign constant 'a'."
        )]
    );
}
