use mathml_renderer::ast::LeafKind::{self, Identifier as Ident, Number as Num, Operator as Op};

use Command::Symbol;

/// What a backslash command turns into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    /// `\frac{top}{bottom}`
    Frac,
    /// `\sqrt{inner}`
    Sqrt,
    /// `\vec{base}`, an arrow over the base.
    Vec,
    /// `\overset{over}{base}`
    Overset,
    /// `\underset{under}{base}`
    Underset,
    /// `\left<delim> ... \right<delim>`
    Left,
    /// Only valid as the end of a `\left` group.
    Right,
    /// `\table[colspec]{...}`
    Table,
    /// `\color{name}{inner}`
    Color,
    /// A command taking one argument which gets a fixed attribute, e.g. `\mathbf`.
    Attribute(&'static str, &'static str),
    /// A fixed leaf.
    Symbol(LeafKind, &'static str),
    /// Renders nothing, e.g. the negative space `\!`.
    Nothing,
}

static COMMANDS: phf::Map<&'static str, Command> = phf::phf_map! {
    "frac" => Command::Frac,
    "sqrt" => Command::Sqrt,
    "vec" => Command::Vec,
    "overset" => Command::Overset,
    "underset" => Command::Underset,
    "left" => Command::Left,
    "right" => Command::Right,
    "table" => Command::Table,
    "color" => Command::Color,
    "mathbf" => Command::Attribute("mathvariant", "bold"),
    "mathrm" => Command::Attribute("mathvariant", "normal"),
    "displaystyle" => Command::Attribute("displaystyle", "true"),
    // Operators
    "pm" => Symbol(Op, "&PlusMinus;"),
    "mp" => Symbol(Op, "&MinusPlus;"),
    "cdot" => Symbol(Op, "&middot;"),
    "times" => Symbol(Op, "&times;"),
    "div" => Symbol(Op, "&divide;"),
    "sum" => Symbol(Op, "&sum;"),
    "prod" => Symbol(Op, "&prod;"),
    "int" => Symbol(Op, "&int;"),
    "iint" => Symbol(Op, "&Int;"),
    "oint" => Symbol(Op, "&oint;"),
    "partial" => Symbol(Op, "&part;"),
    "nabla" => Symbol(Op, "&nabla;"),
    "lim" => Symbol(Op, "lim"),
    "max" => Symbol(Op, "max"),
    "min" => Symbol(Op, "min"),
    "sup" => Symbol(Op, "sup"),
    "inf" => Symbol(Op, "inf"),
    // Relations and arrows
    "rightarrow" => Symbol(Op, "&rightarrow;"),
    "Rightarrow" => Symbol(Op, "&Rightarrow;"),
    "leftarrow" => Symbol(Op, "&leftarrow;"),
    "Leftarrow" => Symbol(Op, "&Leftarrow;"),
    "leftrightarrow" => Symbol(Op, "&leftrightarrow;"),
    "Leftrightarrow" => Symbol(Op, "&Leftrightarrow;"),
    "to" => Symbol(Op, "&rightarrow;"),
    "mapsto" => Symbol(Op, "&mapsto;"),
    "le" => Symbol(Op, "&le;"),
    "leq" => Symbol(Op, "&le;"),
    "ge" => Symbol(Op, "&ge;"),
    "geq" => Symbol(Op, "&ge;"),
    "ne" => Symbol(Op, "&ne;"),
    "neq" => Symbol(Op, "&ne;"),
    "approx" => Symbol(Op, "&approx;"),
    "equiv" => Symbol(Op, "&equiv;"),
    "sim" => Symbol(Op, "&sim;"),
    "propto" => Symbol(Op, "&propto;"),
    // Sets and logic
    "in" => Symbol(Op, "&isin;"),
    "notin" => Symbol(Op, "&notin;"),
    "subset" => Symbol(Op, "&sub;"),
    "subseteq" => Symbol(Op, "&sube;"),
    "supset" => Symbol(Op, "&sup;"),
    "cup" => Symbol(Op, "&cup;"),
    "cap" => Symbol(Op, "&cap;"),
    "forall" => Symbol(Op, "&forall;"),
    "exists" => Symbol(Op, "&exist;"),
    "neg" => Symbol(Op, "&not;"),
    "land" => Symbol(Op, "&and;"),
    "lor" => Symbol(Op, "&or;"),
    "ldots" => Symbol(Op, "&hellip;"),
    "cdots" => Symbol(Op, "&ctdot;"),
    // Fences
    "{" => Symbol(Op, "{"),
    "}" => Symbol(Op, "}"),
    "|" => Symbol(Op, "&Vert;"),
    "langle" => Symbol(Op, "&langle;"),
    "rangle" => Symbol(Op, "&rangle;"),
    // Spaces
    "," => Symbol(Op, "&ThinSpace;"),
    ":" => Symbol(Op, "&MediumSpace;"),
    ";" => Symbol(Op, "&ThickSpace;"),
    " " => Symbol(Op, "&nbsp;"),
    "quad" => Symbol(Op, "&emsp;"),
    "!" => Command::Nothing,
    // Numbers
    "infty" => Symbol(Num, "&infin;"),
    "dif" => Symbol(Num, "d"),
    // Function names
    "sin" => Symbol(Ident, "sin"),
    "cos" => Symbol(Ident, "cos"),
    "tan" => Symbol(Ident, "tan"),
    "cot" => Symbol(Ident, "cot"),
    "arcsin" => Symbol(Ident, "arcsin"),
    "arccos" => Symbol(Ident, "arccos"),
    "arctan" => Symbol(Ident, "arctan"),
    "sinh" => Symbol(Ident, "sinh"),
    "cosh" => Symbol(Ident, "cosh"),
    "tanh" => Symbol(Ident, "tanh"),
    "log" => Symbol(Ident, "log"),
    "ln" => Symbol(Ident, "ln"),
    "lg" => Symbol(Ident, "lg"),
    "exp" => Symbol(Ident, "exp"),
    "det" => Symbol(Ident, "det"),
    "dim" => Symbol(Ident, "dim"),
    "ker" => Symbol(Ident, "ker"),
    "arg" => Symbol(Ident, "arg"),
    "deg" => Symbol(Ident, "deg"),
    "gcd" => Symbol(Ident, "gcd"),
    // Greek letters
    "alpha" => Symbol(Ident, "&alpha;"),
    "beta" => Symbol(Ident, "&beta;"),
    "gamma" => Symbol(Ident, "&gamma;"),
    "delta" => Symbol(Ident, "&delta;"),
    "epsilon" => Symbol(Ident, "&epsilon;"),
    "varepsilon" => Symbol(Ident, "&varepsilon;"),
    "zeta" => Symbol(Ident, "&zeta;"),
    "eta" => Symbol(Ident, "&eta;"),
    "theta" => Symbol(Ident, "&theta;"),
    "vartheta" => Symbol(Ident, "&vartheta;"),
    "iota" => Symbol(Ident, "&iota;"),
    "kappa" => Symbol(Ident, "&kappa;"),
    "lambda" => Symbol(Ident, "&lambda;"),
    "mu" => Symbol(Ident, "&mu;"),
    "nu" => Symbol(Ident, "&nu;"),
    "xi" => Symbol(Ident, "&xi;"),
    "pi" => Symbol(Ident, "&pi;"),
    "rho" => Symbol(Ident, "&rho;"),
    "sigma" => Symbol(Ident, "&sigma;"),
    "tau" => Symbol(Ident, "&tau;"),
    "upsilon" => Symbol(Ident, "&upsilon;"),
    "phi" => Symbol(Ident, "&phi;"),
    "varphi" => Symbol(Ident, "&varphi;"),
    "chi" => Symbol(Ident, "&chi;"),
    "psi" => Symbol(Ident, "&psi;"),
    "omega" => Symbol(Ident, "&omega;"),
    "Gamma" => Symbol(Ident, "&Gamma;"),
    "Delta" => Symbol(Ident, "&Delta;"),
    "Theta" => Symbol(Ident, "&Theta;"),
    "Lambda" => Symbol(Ident, "&Lambda;"),
    "Xi" => Symbol(Ident, "&Xi;"),
    "Pi" => Symbol(Ident, "&Pi;"),
    "Sigma" => Symbol(Ident, "&Sigma;"),
    "Tau" => Symbol(Ident, "&Tau;"),
    "Upsilon" => Symbol(Ident, "&Upsilon;"),
    "Phi" => Symbol(Ident, "&Phi;"),
    "Psi" => Symbol(Ident, "&Psi;"),
    "Omega" => Symbol(Ident, "&Omega;"),
};

#[inline]
pub(crate) fn get_command(name: &str) -> Option<Command> {
    COMMANDS.get(name).copied()
}
