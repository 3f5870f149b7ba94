//! kpathsea numeric file format table.
//!
//! Engines ask for files by `kpse_file_format_type` number. The table maps
//! each number to the format name `kpsewhich -format=` understands and to the
//! default suffixes tried when the requested name has none of them.

/// One kpathsea file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpseFormat {
    pub code: u32,
    pub name: &'static str,
    pub suffixes: &'static [&'static str],
}

impl KpseFormat {
    pub const PK: u32 = 1;
    pub const TFM: u32 = 3;
    pub const FMT: u32 = 10;
    pub const TEX: u32 = 26;

    /// Look up a format by its numeric code.
    pub fn from_code(code: u32) -> Option<&'static KpseFormat> {
        FORMATS.get(code as usize)
    }

    /// Candidate file names for `filename`: the name itself, then the name
    /// with each default suffix it does not already carry.
    pub fn candidates(&self, filename: &str) -> Vec<String> {
        let mut names = vec![filename.to_string()];
        if !self.suffixes.iter().any(|s| filename.ends_with(s)) {
            names.extend(self.suffixes.iter().map(|s| format!("{filename}{s}")));
        }
        names
    }
}

macro_rules! formats {
    ($(($code:expr, $name:expr, [$($suffix:expr),*])),* $(,)?) => {
        &[$(KpseFormat { code: $code, name: $name, suffixes: &[$($suffix),*] }),*]
    };
}

static FORMATS: &[KpseFormat] = formats![
    (0, "gf", [".gf"]),
    (1, "pk", [".pk"]),
    (2, "bitmap font", []),
    (3, "tfm", [".tfm"]),
    (4, "afm", [".afm"]),
    (5, "base", [".base"]),
    (6, "bib", [".bib"]),
    (7, "bst", [".bst"]),
    (8, "cnf", [".cnf"]),
    (9, "ls-R", []),
    (10, "fmt", [".fmt"]),
    (11, "map", [".map"]),
    (12, "mem", [".mem"]),
    (13, "mf", [".mf"]),
    (14, "mfpool", [".pool"]),
    (15, "mft", [".mft"]),
    (16, "mp", [".mp"]),
    (17, "mppool", [".pool"]),
    (18, "MetaPost support", []),
    (19, "ocp", [".ocp"]),
    (20, "ofm", [".ofm", ".tfm"]),
    (21, "opl", [".opl", ".pl"]),
    (22, "otp", [".otp"]),
    (23, "ovf", [".ovf", ".vf"]),
    (24, "ovp", [".ovp", ".vpl"]),
    (25, "graphic/figure", [".eps", ".epsi"]),
    (26, "tex", [".tex"]),
    (27, "TeX system documentation", []),
    (28, "texpool", [".pool"]),
    (29, "TeX system sources", [".dtx", ".ins"]),
    (30, "PostScript header", [".pro"]),
    (31, "Troff fonts", []),
    (32, "type1 fonts", [".pfa", ".pfb"]),
    (33, "vf", [".vf"]),
    (34, "dvips config", []),
    (35, "ist", [".ist"]),
    (36, "truetype fonts", [".ttf", ".ttc", ".TTF", ".TTC", ".dfont"]),
    (37, "type42 fonts", [".t42", ".T42"]),
    (38, "web2c files", []),
    (39, "other text files", []),
    (40, "other binary files", []),
    (41, "misc fonts", []),
    (42, "web", [".web"]),
    (43, "cweb", [".w"]),
    (44, "enc files", [".enc"]),
    (45, "cmap files", []),
    (46, "subfont definition files", [".sfd"]),
    (47, "opentype fonts", [".otf", ".OTF"]),
    (48, "pdftex config", []),
    (49, "lig files", [".lig"]),
    (50, "texmfscripts", []),
    (51, "lua", [".lua", ".luatex", ".luc", ".luctex", ".texlua", ".texluc", ".tlu"]),
    (52, "font feature files", [".fea"]),
    (53, "cid maps", [".cid", ".cidmap"]),
    (54, "mlbib", [".mlbib", ".bib"]),
    (55, "mlbst", [".mlbst", ".bst"]),
    (56, "clua", [".dll", ".so"]),
    (57, "ris", [".ris"]),
    (58, "bltxml", [".bltxml"]),
];
