//! Layout settings of a view: paper size, automatic layout and line routing.

use std::{fmt, str::FromStr};

/// Orientation of a [`PaperSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Portrait,
    Landscape,
}

macro_rules! paper_sizes {
    ($($variant:ident => $name:literal, $size:literal, $orientation:ident, $width:literal x $height:literal;)+) => {
        /// Paper sizes, in pixels at 300dpi.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(non_camel_case_types)]
        pub enum PaperSize {
            $($variant,)+
        }

        impl PaperSize {
            /// The document name of the paper size, e.g. `A4_Landscape`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// The human-readable size, e.g. `A4` or `Slide 16:9`.
            pub fn size(&self) -> &'static str {
                match self {
                    $(Self::$variant => $size,)+
                }
            }

            pub fn orientation(&self) -> Orientation {
                match self {
                    $(Self::$variant => Orientation::$orientation,)+
                }
            }

            pub fn width(&self) -> u32 {
                match self {
                    $(Self::$variant => $width,)+
                }
            }

            pub fn height(&self) -> u32 {
                match self {
                    $(Self::$variant => $height,)+
                }
            }
        }

        impl FromStr for PaperSize {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err("unknown paper size"),
                }
            }
        }
    };
}

paper_sizes! {
    A6_Portrait => "A6_Portrait", "A6", Portrait, 1240 x 1748;
    A6_Landscape => "A6_Landscape", "A6", Landscape, 1748 x 1240;
    A5_Portrait => "A5_Portrait", "A5", Portrait, 1748 x 2480;
    A5_Landscape => "A5_Landscape", "A5", Landscape, 2480 x 1748;
    A4_Portrait => "A4_Portrait", "A4", Portrait, 2480 x 3508;
    A4_Landscape => "A4_Landscape", "A4", Landscape, 3508 x 2480;
    A3_Portrait => "A3_Portrait", "A3", Portrait, 3508 x 4961;
    A3_Landscape => "A3_Landscape", "A3", Landscape, 4961 x 3508;
    A2_Portrait => "A2_Portrait", "A2", Portrait, 4961 x 7016;
    A2_Landscape => "A2_Landscape", "A2", Landscape, 7016 x 4961;
    A1_Portrait => "A1_Portrait", "A1", Portrait, 7016 x 9933;
    A1_Landscape => "A1_Landscape", "A1", Landscape, 9933 x 7016;
    A0_Portrait => "A0_Portrait", "A0", Portrait, 9933 x 14043;
    A0_Landscape => "A0_Landscape", "A0", Landscape, 14043 x 9933;
    Letter_Portrait => "Letter_Portrait", "Letter", Portrait, 2550 x 3300;
    Letter_Landscape => "Letter_Landscape", "Letter", Landscape, 3300 x 2550;
    Legal_Portrait => "Legal_Portrait", "Legal", Portrait, 2550 x 4200;
    Legal_Landscape => "Legal_Landscape", "Legal", Landscape, 4200 x 2550;
    Slide_4_3 => "Slide_4_3", "Slide 4:3", Landscape, 3306 x 2480;
    Slide_16_9 => "Slide_16_9", "Slide 16:9", Landscape, 3508 x 1973;
    Slide_16_10 => "Slide_16_10", "Slide 16:10", Landscape, 3508 x 2193;
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which automatic layout ranks elements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankDirection {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl RankDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopBottom => "TopBottom",
            Self::BottomTop => "BottomTop",
            Self::LeftRight => "LeftRight",
            Self::RightLeft => "RightLeft",
        }
    }
}

impl FromStr for RankDirection {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TopBottom" => Ok(Self::TopBottom),
            "BottomTop" => Ok(Self::BottomTop),
            "LeftRight" => Ok(Self::LeftRight),
            "RightLeft" => Ok(Self::RightLeft),
            _ => Err("expected one of `TopBottom`, `BottomTop`, `LeftRight`, `RightLeft`"),
        }
    }
}

/// How relationship lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routing {
    Direct,
    Orthogonal,
    Curved,
}

impl Routing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Orthogonal => "Orthogonal",
            Self::Curved => "Curved",
        }
    }
}

impl FromStr for Routing {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Direct" => Ok(Self::Direct),
            "Orthogonal" => Ok(Self::Orthogonal),
            "Curved" => Ok(Self::Curved),
            _ => Err("expected one of `Direct`, `Orthogonal`, `Curved`"),
        }
    }
}

/// Settings for automatic (graph-based) layout of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomaticLayout {
    pub rank_direction: RankDirection,
    pub rank_separation: i64,
    pub node_separation: i64,
    pub edge_separation: i64,
    pub vertices: bool,
}

impl Default for AutomaticLayout {
    fn default() -> Self {
        Self {
            rank_direction: RankDirection::TopBottom,
            rank_separation: 300,
            node_separation: 300,
            edge_separation: 0,
            vertices: false,
        }
    }
}

/// A bend point on a relationship line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: i64,
    pub y: i64,
}

impl Vertex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_size_lookup() {
        let size: PaperSize = "A4_Landscape".parse().unwrap();
        assert_eq!(size, PaperSize::A4_Landscape);
        assert_eq!(size.size(), "A4");
        assert_eq!(size.orientation(), Orientation::Landscape);
        assert_eq!((size.width(), size.height()), (3508, 2480));
        assert_eq!(size.to_string(), "A4_Landscape");
    }

    #[test]
    fn test_slide_sizes() {
        assert_eq!(PaperSize::Slide_16_9.size(), "Slide 16:9");
        assert!("Slide_21_9".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_rank_direction_and_routing() {
        assert_eq!("LeftRight".parse(), Ok(RankDirection::LeftRight));
        assert_eq!(RankDirection::default().as_str(), "TopBottom");
        assert_eq!("Curved".parse(), Ok(Routing::Curved));
        assert!("curved".parse::<Routing>().is_err());
    }
}
