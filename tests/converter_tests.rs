use pretty_assertions::assert_eq;
use rstest::rstest;
use sharpcraft::application::{convert, ConvertOptions, Converter};
use sharpcraft::domain::converting::{ConvertError, IdentifierMap};
use sharpcraft::domain::syntax::SyntaxKind;

const GENERATED_CLASS: &str = r#"
namespace Generated
{
    using System;

    public class GeneartedClass
    {
        public static Model.ReportModel Test(Model.ProcessingModel model)
        {
            model.Result = (model.InputA
                        + (model.InputB * model.Factor));
            model.Delta = (System.Math.Abs(model.Result.GetValueOrDefault(0m)) - model.InputA);
            model.Description = "Some description";
            Model.ReportModel reportModel = new Model.ReportModel();
            reportModel.Σ = model.Result;
            reportModel.Δ = model.Delta;
            reportModel.λ = model.Description;
            return reportModel;
        }
    }
}"#;

const GENERATED_MODULE: &str = "Imports System

Namespace Generated
    Public Class GeneartedClass
        Public Shared Function Test(model As Model.ProcessingModel) As Model.ReportModel
            model.Result = (model.InputA + (model.InputB * model.Factor))
            model.Delta = (System.Math.Abs(model.Result.GetValueOrDefault(0D)) - model.InputA)
            model.Description = \"Some description\"
            Dim reportModel As Model.ReportModel = New Model.ReportModel()
            reportModel.Σ = model.Result
            reportModel.Δ = model.Delta
            reportModel.λ = model.Description
            Return reportModel
        End Function
    End Class
End Namespace";

#[test]
fn generated_class_converts_to_a_module() {
    assert_eq!(convert(GENERATED_CLASS, None, false).unwrap(), GENERATED_MODULE);
}

#[test]
fn conversion_is_deterministic() {
    let first = convert(GENERATED_CLASS, None, false).unwrap();
    let second = convert(GENERATED_CLASS, None, false).unwrap();
    assert_eq!(first, second);
}

#[rstest]
#[case("x == null", "x Is Nothing")]
#[case("a ?? b", "If(a, b)")]
#[case("flag ? 1 : 2", "If(flag, 1, 2)")]
#[case("1.5m", "1.5D")]
fn expressions(#[case] csharp: &str, #[case] vb: &str) {
    assert_eq!(convert(csharp, None, false).unwrap(), vb);
}

#[rstest]
#[case("for (int i = 0; i < 10; i++) { Use(i); }", "For i = 0 To 9\n    Use(i)\nNext")]
#[case("for (var i = n; i >= 0; i--) Use(i);", "For i = n To 0 Step -1\n    Use(i)\nNext")]
#[case("for (int i = 0, j = 9; i < j; i++, j--) { }", "Dim i As Integer = 0, j As Integer = 9\nWhile i < j\n    i = i + 1\n    j = j - 1\nEnd While")]
#[case("for (var i = 10; i > 0; i -= 2) { Use(i); }", "For i = 10 To 1 Step -2\n    Use(i)\nNext")]
#[case("for (int i = 0; i < 10; i -= -1) { }", "For i = 0 To 9 Step 1\nNext")]
#[case("for (int i = 0; i < 10; i = Foo(i)) { Use(i); }", "Dim i As Integer = 0\nWhile i < 10\n    Use(i)\n    i = Foo(i)\nEnd While")]
#[case(
    "for (int i = 0; i < 10; i = Foo(i)) { if (Skip(i)) continue; Use(i); }",
    "Dim i As Integer = 0\nWhile i < 10\n    If Skip(i) Then\n        i = Foo(i)\n        Continue While\n    End If\n    Use(i)\n    i = Foo(i)\nEnd While"
)]
fn for_loops(#[case] csharp: &str, #[case] vb: &str) {
    assert_eq!(convert(csharp, None, false).unwrap(), vb);
}

#[test]
fn statement_only_expression_becomes_a_placeholder() {
    let out = convert("class C { void M() { Span<int> s = stackalloc int[4]; } }", None, false).unwrap();
    assert!(out.contains("could not be converted to a"), "{out}");
    assert!(out.contains("stackalloc int[4]"), "{out}");
}

#[test]
fn local_functions_are_reported_as_unmapped() {
    let err = convert("class C { void M() { int Twice(int x) { return x * 2; } } }", None, false).unwrap_err();
    assert!(
        matches!(err, ConvertError::Unmapped { kind: SyntaxKind::LocalFunctionStatement, .. }),
        "{err:?}"
    );
}

#[test]
fn identifier_map_renames_declarations_and_uses() {
    let map = IdentifierMap::from([("Old".to_string(), "Renamed".to_string())]);
    let out = convert("class Old { Old Self() { return new Old(); } }", Some(&map), false).unwrap();
    assert!(!out.contains("Old"), "{out}");
    assert!(out.contains("Class Renamed"), "{out}");
    assert!(out.contains("Return New Renamed()"), "{out}");
}

#[test]
fn multi_line_verbatim_strings_become_xml_literals_on_request() {
    let src = "var s = @\"first\nsecond\";";
    let plain = convert(src, None, false).unwrap();
    let xml = convert(src, None, true).unwrap();
    assert_ne!(plain, xml);
    assert!(xml.contains("second"), "{xml}");
}

#[test]
fn strict_mode_rejects_broken_input() {
    let converter = Converter::with_options(ConvertOptions { strict: true, ..Default::default() });
    let err = converter.convert("class C { void M( }").unwrap_err();
    assert!(matches!(err, ConvertError::Parse(_)), "{err:?}");
    assert!(convert("class C { void M( }", None, false).is_ok());
}
