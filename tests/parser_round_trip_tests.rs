use proptest::prelude::*;
use sharpcraft::infrastructure::csharp::parser::{parse_compilation_unit, parse_statement};

const PROGRAMS: &[&str] = &[
    "using System;\n\nnamespace N\n{\n    [Serializable]\n    public class C : Base, IFoo where T : class\n    {\n        private int _x = 1;\n        public int X { get { return _x; } private set { _x = value; } }\n        public event EventHandler E { add { } remove { } }\n        public static C operator +(C a, C b) { return a; }\n        public object M(int[] values, ref string s)\n        {\n            for (var i = 0; i < values.Length; i++) { if (values[i] > 0) return null; }\n            return default(object);\n        }\n    }\n    enum E : byte { One = 1, Two }\n}\n",
    "class Q\n{\n    IEnumerable<int> Run(List<int> xs)\n    {\n        var q = from x in xs where x > 1 select x * 2;\n        switch (xs.Count) { case 0: yield break; default: break; }\n        foreach (var x in q) { yield return x; }\n        try { Use(() => x); } catch (Exception ex) { throw; } finally { }\n    }\n}\n",
    "#if DEBUG\nclass D { }\n#else\nclass R { public R(int x) : base(x) { } ~R() { } }\n#endif\ninterface I { string this[int i] { get; } void M<T>(T t) where T : struct; }\n",
];

const FRAGMENTS: &[&str] = &[
    "namespace", "public", "[A]", "{", "}", "(", ")", ";", ",", "<", ">", ">>", "=", "get",
    "set", "add", "remove", "event", "operator", "class", "this", ".", "?", ":", "\"", "@",
    "'", "/*", "//", "#if X\n", "\n", " ",
];

/// Inserts `fragment` at the nearest char boundary at or below `at`.
fn insert(src: &str, at: usize, fragment: &str) -> String {
    let mut at = at.min(src.len());
    while !src.is_char_boundary(at) {
        at -= 1;
    }
    format!("{}{}{}", &src[..at], fragment, &src[at..])
}

fn delete(src: &str, at: usize, len: usize) -> String {
    let chars: Vec<char> = src.chars().collect();
    let at = at.min(chars.len());
    let end = (at + len).min(chars.len());
    chars[..at].iter().chain(&chars[end..]).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn edited_programs_keep_every_character(
        program in 0..PROGRAMS.len(),
        edits in prop::collection::vec((0usize..600, 0..FRAGMENTS.len(), 0usize..4, any::<bool>()), 1..4),
    ) {
        let mut src = PROGRAMS[program].to_string();
        for (at, fragment, len, inserting) in edits {
            src = if inserting { insert(&src, at, FRAGMENTS[fragment]) } else { delete(&src, at, len) };
        }
        let tree = parse_compilation_unit(&src, &[]);
        prop_assert_eq!(tree.text(), src.as_str());
    }

    #[test]
    fn arbitrary_text_keeps_every_character(src in "[a-z{}()\\[\\];,.<>=:?\"' \n]{0,80}") {
        let tree = parse_compilation_unit(&src, &[]);
        prop_assert_eq!(tree.text(), src.as_str());
    }

    #[test]
    fn consumed_statements_keep_every_character(src in "[a-z{}();=<>+ ]{0,40}") {
        let tree = parse_statement(&src, &[]);
        if tree.consumed_all() {
            prop_assert_eq!(tree.text(), src.as_str());
        }
    }
}

#[test]
fn pristine_programs_round_trip() {
    for src in PROGRAMS {
        assert_eq!(parse_compilation_unit(src, &[]).text(), *src);
    }
}
