//! Binds every controller to the page and runs the one-time init.

use std::cell::RefCell;
use std::rc::Rc;

use yew::Callback;

use crate::components::{
    ClipboardCopier, Dialog, FirstInteraction, MusicController, SocialRouter, TitleRotator,
    ZoomModal,
};
use crate::model::SiteConfig;
use crate::platform::Host;

pub struct Toolkit {
    pub title: TitleRotator,
    pub dialog: Dialog,
    pub copier: ClipboardCopier,
    pub social: SocialRouter,
    pub zoom: ZoomModal,
    pub music: Rc<MusicController>,
    first_interaction: RefCell<Option<Rc<FirstInteraction>>>,
    card_selector: String,
    host: Host,
}

impl Toolkit {
    /// Looks up every bound element once; anything missing leaves its controller inert.
    pub fn new(host: Host, config: SiteConfig) -> Self {
        let doc = host.document.clone();
        let ids = &config.ids;

        let dialog = Dialog::new(
            doc.element_by_id(&ids.dialog_scrim),
            doc.element_by_id(&ids.dialog_container),
        );
        let on_copied = {
            let dialog = dialog.clone();
            Callback::from(move |_| dialog.show())
        };
        let copier = ClipboardCopier::new(
            doc.clone(),
            host.clipboard.clone(),
            host.console.clone(),
            host.scheduler.clone(),
            on_copied,
        );
        let title = TitleRotator::new(
            doc.element_by_id(&ids.main_title),
            config.titles.clone(),
            config.title_period_ms,
            host.scheduler.clone(),
        );
        let social = SocialRouter::new(
            config.social_links.clone(),
            host.tabs.clone(),
            host.console.clone(),
        );
        let zoom = ZoomModal::new(
            doc.element_by_id(&ids.zoom_modal),
            doc.element_by_id(&ids.zoom_image),
            doc.element_by_id(&ids.zoom_title),
            doc.body(),
        );
        let music = Rc::new(MusicController::new(
            doc.audio_by_id(&ids.background_music),
            doc.element_by_id(&ids.music_toggle),
            host.icons.clone(),
            host.console.clone(),
            host.scheduler.clone(),
        ));

        Self {
            title,
            dialog,
            copier,
            social,
            zoom,
            music,
            first_interaction: RefCell::new(None),
            card_selector: ids.card_selector.clone(),
            host,
        }
    }

    /// Page-load work. Runs once; the timers and listeners it installs live
    /// as long as the page.
    pub fn init(&self) {
        if self.first_interaction.borrow().is_some() {
            return;
        }
        self.host.icons.render_icons();
        self.stagger_cards();
        self.title.start();
        self.music.bind_button();
        let gate = FirstInteraction::arm(self.music.clone(), self.host.document.clone());
        *self.first_interaction.borrow_mut() = Some(gate);
    }

    // `--i` drives the CSS fade-in delay of each card.
    fn stagger_cards(&self) {
        let cards = self.host.document.select_all(&self.card_selector);
        for (i, card) in cards.iter().enumerate() {
            card.set_style_property("--i", &(i + 1).to_string());
        }
    }
}
