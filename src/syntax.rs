use crate::highlight::Highlight;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyword {
    pub text: &'static str,
    pub hl: Highlight,
}

const fn kw1(text: &'static str) -> Keyword {
    Keyword {
        text,
        hl: Highlight::Keyword1,
    }
}

const fn kw2(text: &'static str) -> Keyword {
    Keyword {
        text,
        hl: Highlight::Keyword2,
    }
}

// Immutable syntax description selected by file name. Profiles are registered once in SYNTAXES
// and buffers only borrow them.
#[derive(Debug, PartialEq)]
pub struct Syntax {
    pub name: &'static str,
    // Starting with '.' means file extension. Otherwise it is matched as substring of file name
    pub filematch: &'static [&'static str],
    pub keywords: &'static [Keyword],
    pub line_comment: Option<&'static str>,
    pub number: bool,
    pub string: bool,
}

const C_SYNTAX: Syntax = Syntax {
    name: "c",
    filematch: &[".c", ".h", ".cpp"],
    keywords: &[
        kw1("switch"),
        kw1("if"),
        kw1("while"),
        kw1("for"),
        kw1("break"),
        kw1("continue"),
        kw1("return"),
        kw1("else"),
        kw1("struct"),
        kw1("union"),
        kw1("typedef"),
        kw1("static"),
        kw1("enum"),
        kw1("class"),
        kw1("case"),
        kw2("int"),
        kw2("long"),
        kw2("double"),
        kw2("float"),
        kw2("char"),
        kw2("unsigned"),
        kw2("signed"),
        kw2("void"),
    ],
    line_comment: Some("//"),
    number: true,
    string: true,
};

const RUST_SYNTAX: Syntax = Syntax {
    name: "rust",
    filematch: &[".rs"],
    keywords: &[
        kw1("as"),
        kw1("break"),
        kw1("const"),
        kw1("continue"),
        kw1("crate"),
        kw1("else"),
        kw1("enum"),
        kw1("fn"),
        kw1("for"),
        kw1("if"),
        kw1("impl"),
        kw1("in"),
        kw1("let"),
        kw1("loop"),
        kw1("match"),
        kw1("mod"),
        kw1("mut"),
        kw1("pub"),
        kw1("return"),
        kw1("static"),
        kw1("struct"),
        kw1("trait"),
        kw1("type"),
        kw1("use"),
        kw1("where"),
        kw1("while"),
        kw2("bool"),
        kw2("char"),
        kw2("i8"),
        kw2("i16"),
        kw2("i32"),
        kw2("i64"),
        kw2("isize"),
        kw2("u8"),
        kw2("u16"),
        kw2("u32"),
        kw2("u64"),
        kw2("usize"),
        kw2("f32"),
        kw2("f64"),
        kw2("str"),
        kw2("String"),
        kw2("Vec"),
        kw2("Option"),
        kw2("Result"),
        kw2("Self"),
        kw2("self"),
    ],
    line_comment: Some("//"),
    number: true,
    string: true,
};

const PYTHON_SYNTAX: Syntax = Syntax {
    name: "python",
    filematch: &[".py"],
    keywords: &[
        kw1("and"),
        kw1("as"),
        kw1("break"),
        kw1("class"),
        kw1("continue"),
        kw1("def"),
        kw1("elif"),
        kw1("else"),
        kw1("except"),
        kw1("for"),
        kw1("from"),
        kw1("if"),
        kw1("import"),
        kw1("in"),
        kw1("is"),
        kw1("lambda"),
        kw1("not"),
        kw1("or"),
        kw1("pass"),
        kw1("raise"),
        kw1("return"),
        kw1("try"),
        kw1("while"),
        kw1("with"),
        kw1("yield"),
        kw2("None"),
        kw2("True"),
        kw2("False"),
        kw2("self"),
        kw2("int"),
        kw2("str"),
        kw2("list"),
        kw2("dict"),
    ],
    line_comment: Some("#"),
    number: true,
    string: true,
};

const GO_SYNTAX: Syntax = Syntax {
    name: "go",
    filematch: &[".go"],
    keywords: &[
        kw1("break"),
        kw1("case"),
        kw1("chan"),
        kw1("const"),
        kw1("continue"),
        kw1("default"),
        kw1("defer"),
        kw1("else"),
        kw1("for"),
        kw1("func"),
        kw1("go"),
        kw1("if"),
        kw1("import"),
        kw1("interface"),
        kw1("map"),
        kw1("package"),
        kw1("range"),
        kw1("return"),
        kw1("select"),
        kw1("struct"),
        kw1("switch"),
        kw1("type"),
        kw1("var"),
        kw2("bool"),
        kw2("byte"),
        kw2("error"),
        kw2("float64"),
        kw2("int"),
        kw2("int64"),
        kw2("rune"),
        kw2("string"),
        kw2("uint"),
        kw2("nil"),
    ],
    line_comment: Some("//"),
    number: true,
    string: true,
};

const JAVASCRIPT_SYNTAX: Syntax = Syntax {
    name: "javascript",
    filematch: &[".js"],
    keywords: &[
        kw1("break"),
        kw1("case"),
        kw1("catch"),
        kw1("class"),
        kw1("const"),
        kw1("continue"),
        kw1("default"),
        kw1("delete"),
        kw1("do"),
        kw1("else"),
        kw1("export"),
        kw1("for"),
        kw1("function"),
        kw1("if"),
        kw1("import"),
        kw1("let"),
        kw1("new"),
        kw1("return"),
        kw1("switch"),
        kw1("throw"),
        kw1("try"),
        kw1("typeof"),
        kw1("var"),
        kw1("while"),
        kw2("true"),
        kw2("false"),
        kw2("null"),
        kw2("undefined"),
        kw2("this"),
    ],
    line_comment: Some("//"),
    number: true,
    string: true,
};

const MAKEFILE_SYNTAX: Syntax = Syntax {
    name: "make",
    filematch: &["Makefile", "makefile"],
    keywords: &[
        kw1("ifeq"),
        kw1("ifneq"),
        kw1("ifdef"),
        kw1("ifndef"),
        kw1("else"),
        kw1("endif"),
        kw1("include"),
        kw1("define"),
        kw1("endef"),
        kw2(".PHONY"),
    ],
    line_comment: Some("#"),
    number: false,
    string: true,
};

pub static SYNTAXES: &[Syntax] = &[
    C_SYNTAX,
    RUST_SYNTAX,
    PYTHON_SYNTAX,
    GO_SYNTAX,
    JAVASCRIPT_SYNTAX,
    MAKEFILE_SYNTAX,
];

impl Syntax {
    fn matches(&self, file_name: &str) -> bool {
        // Extension is the part from the last '.'
        let ext = file_name.rfind('.').map(|idx| &file_name[idx..]);
        self.filematch.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                file_name.contains(pat)
            }
        })
    }

    pub fn detect<P: AsRef<Path>>(path: P) -> Option<&'static Syntax> {
        let path = path.as_ref();
        let name = path.file_name()?.to_str()?;
        SYNTAXES.iter().find(|s| s.matches(name))
    }

    // Find the longest keyword which is a prefix of the input and followed by a separator (or end
    // of the input). Returns the length of the keyword and its highlight.
    pub fn keyword_at(&self, input: &[u8]) -> Option<(usize, Highlight)> {
        self.keywords
            .iter()
            .filter(|k| {
                let text = k.text.as_bytes();
                input.starts_with(text)
                    && input
                        .get(text.len())
                        .map_or(true, |&b| crate::highlight::is_separator(b))
            })
            .max_by_key(|k| k.text.len())
            .map(|k| (k.text.len(), k.hl))
    }
}
