//! Owned model of the readout elements

use crate::present::StatusClass;

/// Class applied to the time text while it pulses
pub const FLASH_CLASS: &str = "flash";

/// Ordered set of class names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<&'static str>,
}

impl ClassList {
    pub fn add(&mut self, class: &'static str) {
        if !self.contains(class) {
            self.classes.push(class);
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| *c != class);
    }

    pub fn toggle(&mut self, class: &'static str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.iter().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub classes: ClassList,
}

impl Element {
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
        }
    }
}

/// The readout: a container carrying the status class, the time text and
/// the status label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub timer: Element,
    pub time: Element,
    pub status: Element,
}

impl Document {
    /// Apply exactly one status class to the container
    pub fn set_status_class(&mut self, class: StatusClass) {
        for other in StatusClass::ALL {
            self.timer.classes.remove(other.as_str());
        }
        self.timer.classes.add(class.as_str());
    }

    /// The status class currently applied, if any
    pub fn status_class(&self) -> Option<StatusClass> {
        StatusClass::ALL
            .into_iter()
            .find(|c| self.timer.classes.contains(c.as_str()))
    }

    pub fn set_flash(&mut self, on: bool) {
        self.time.classes.toggle(FLASH_CLASS, on);
    }

    pub fn is_flashing(&self) -> bool {
        self.time.classes.contains(FLASH_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class_is_exclusive() {
        let mut doc = Document::default();
        doc.timer.classes.add("layout");

        for class in StatusClass::ALL {
            doc.set_status_class(class);
            let applied: Vec<_> = doc
                .timer
                .classes
                .iter()
                .filter(|c| StatusClass::ALL.iter().any(|s| s.as_str() == *c))
                .collect();
            assert_eq!(applied, vec![class.as_str()]);
            assert_eq!(doc.status_class(), Some(class));
        }

        // Unrelated classes survive
        assert!(doc.timer.classes.contains("layout"));
    }

    #[test]
    fn test_flash_toggle() {
        let mut doc = Document::default();
        doc.set_flash(true);
        doc.set_flash(true);
        assert!(doc.is_flashing());
        assert_eq!(doc.time.classes.iter().count(), 1);

        doc.set_flash(false);
        assert!(!doc.is_flashing());
    }
}
