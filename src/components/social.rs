use std::collections::BTreeMap;
use std::rc::Rc;

use crate::platform::{Console, TabOpener};

pub struct SocialRouter {
    links: BTreeMap<String, String>,
    tabs: Rc<dyn TabOpener>,
    console: Rc<dyn Console>,
}

impl SocialRouter {
    pub fn new(
        links: BTreeMap<String, String>,
        tabs: Rc<dyn TabOpener>,
        console: Rc<dyn Console>,
    ) -> Self {
        Self {
            links,
            tabs,
            console,
        }
    }

    pub fn url_for(&self, platform: &str) -> Option<&str> {
        self.links.get(platform).map(String::as_str)
    }

    /// Opens the platform's page in a new tab. Returns whether a tab was opened.
    pub fn open(&self, platform: &str) -> bool {
        let Some(url) = self.url_for(platform) else {
            self.console
                .warn(&format!("No link configured for platform: {platform}"));
            return false;
        };
        match self.tabs.open_tab(url) {
            Ok(()) => true,
            Err(err) => {
                self.console.warn(&format!("Could not open {url}: {err}"));
                false
            }
        }
    }
}
