pub const HIDDEN_PROJECT_SELECTOR: &str = ".hidden-project";
pub const TOGGLE_BUTTON_SELECTOR: &str = ".view-all-container button";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectsVisibility {
    Collapsed,
    Expanded,
}

impl ProjectsVisibility {
    pub fn from_display(display: &str) -> Self {
        match display.trim() {
            "block" => Self::Expanded,
            _ => Self::Collapsed,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Self::Collapsed => "none",
            Self::Expanded => "block",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Collapsed => "View All Projects",
            Self::Expanded => "Show Less",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_hidden_projects_start_collapsed() {
        assert_eq!(ProjectsVisibility::from_display(""), ProjectsVisibility::Collapsed);
        assert_eq!(ProjectsVisibility::from_display("none"), ProjectsVisibility::Collapsed);
    }

    #[test]
    fn toggle_expands_then_relabels() {
        let next = ProjectsVisibility::from_display("").toggled();
        assert_eq!(next.display(), "block");
        assert_eq!(next.button_label(), "Show Less");
    }

    #[test]
    fn toggling_twice_restores_display_and_label() {
        let start = ProjectsVisibility::from_display("none");
        let twice = ProjectsVisibility::from_display(start.toggled().display()).toggled();

        assert_eq!(twice, start);
        assert_eq!(twice.display(), "none");
        assert_eq!(twice.button_label(), "View All Projects");
    }
}
