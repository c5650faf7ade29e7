use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::SiteConfig;
use crate::contact::{self, ContactForm, ContactState, SubmitOutcome};
use crate::countdown::{Clock, Countdown};
use crate::document::Document;
use crate::feed::{self, FeedItem, FeedSource, FeedState};
use crate::fetcher::Fetcher;
use crate::route::Route;
use crate::store::KvStore;
use crate::theme::{Theme, ThemeContext};
use crate::timer::ScheduledTask;

/// Scroll offset at which the header switches to its compact style.
pub const SCROLLED_THRESHOLD: u32 = 10;
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Everything that can change shell state. Completions carry the view
/// generation they were started under and are dropped if it is stale.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    Navigate(String),
    /// A nav link click: closes the mobile menu, then navigates.
    NavLinkClicked(String),
    LoadingElapsed { generation: u64 },
    Scrolled(u32),
    Online,
    Offline,
    DismissOffline,
    ToggleMenu,
    ToggleTheme,
    CountdownTick { generation: u64 },
    FeedSettled {
        generation: u64,
        items: Vec<FeedItem>,
        source: FeedSource,
    },
    SubmitContact(ContactForm),
    ContactSettled {
        generation: u64,
        outcome: SubmitOutcome,
    },
    ContactMessageExpired { generation: u64, submission: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub route: Route,
    pub loading: bool,
    pub menu_open: bool,
    pub scrolled: bool,
    /// Actual connectivity as last reported.
    pub online: bool,
    pub offline_banner: bool,
}

#[derive(Debug)]
pub struct HomePage {
    pub countdown: Option<Countdown>,
    pub feed: FeedState,
    ticker: Option<ScheduledTask>,
    fetch: Option<ScheduledTask>,
}

#[derive(Debug, Default)]
pub struct ContactPage {
    pub state: ContactState,
    submission: u64,
    request: Option<ScheduledTask>,
    hide_timer: Option<ScheduledTask>,
}

/// Per-view state. Replacing it drops the previous view's tasks.
#[derive(Debug)]
pub enum PageState {
    Home(HomePage),
    Contact(ContactPage),
    Static,
}

/// What a renderer gets to see.
pub struct View<'a> {
    pub config: &'a SiteConfig,
    pub nav: &'a NavigationState,
    pub document: &'a Document,
    pub theme: ThemeContext<'a>,
    pub page: &'a PageState,
}

pub fn channel() -> (UnboundedSender<ShellEvent>, UnboundedReceiver<ShellEvent>) {
    mpsc::unbounded_channel()
}

pub struct Shell<S> {
    config: Arc<SiteConfig>,
    fetcher: Fetcher,
    clock: Arc<dyn Clock>,
    theme: Theme<S>,
    document: Document,
    nav: NavigationState,
    page: PageState,
    generation: u64,
    loading_timer: Option<ScheduledTask>,
    tx: UnboundedSender<ShellEvent>,
}

impl<S: KvStore> Shell<S> {
    /// Loads the theme and mounts the view for `path`.
    pub fn start(
        config: Arc<SiteConfig>,
        fetcher: Fetcher,
        clock: Arc<dyn Clock>,
        store: S,
        tx: UnboundedSender<ShellEvent>,
        path: &str,
    ) -> anyhow::Result<Self> {
        let mut document = Document::new();
        let theme = Theme::load(store, &mut document)?;
        let route = Route::resolve(path);
        let mut shell = Self {
            config,
            fetcher,
            clock,
            theme,
            document,
            nav: NavigationState {
                route,
                loading: true,
                menu_open: false,
                scrolled: false,
                online: true,
                offline_banner: false,
            },
            page: PageState::Static,
            generation: 0,
            loading_timer: None,
            tx,
        };
        shell.enter(route);
        Ok(shell)
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn theme(&self) -> &Theme<S> {
        &self.theme
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> View<'_> {
        View {
            config: &self.config,
            nav: &self.nav,
            document: &self.document,
            theme: self.theme.context(),
            page: &self.page,
        }
    }

    /// No loading indicator, fetch, or submission outstanding.
    pub fn is_settled(&self) -> bool {
        if self.nav.loading {
            return false;
        }
        match &self.page {
            PageState::Home(home) => !home.feed.is_loading(),
            PageState::Contact(contact) => !contact.state.submitting,
            PageState::Static => true,
        }
    }

    /// Applies one event. Returns whether any state changed.
    pub fn handle(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::Navigate(path) => self.navigate(&path),
            ShellEvent::NavLinkClicked(path) => {
                self.nav.menu_open = false;
                self.navigate(&path);
                true
            }
            ShellEvent::LoadingElapsed { generation } => {
                if generation != self.generation || !self.nav.loading {
                    return false;
                }
                self.nav.loading = false;
                self.loading_timer = None;
                true
            }
            ShellEvent::Scrolled(y) => {
                self.document.scroll_y = y;
                let scrolled = y >= SCROLLED_THRESHOLD;
                let changed = scrolled != self.nav.scrolled;
                self.nav.scrolled = scrolled;
                changed
            }
            ShellEvent::Online => {
                let changed = !self.nav.online || self.nav.offline_banner;
                self.nav.online = true;
                self.nav.offline_banner = false;
                if changed {
                    tracing::info!("back online");
                }
                changed
            }
            ShellEvent::Offline => {
                let changed = self.nav.online || !self.nav.offline_banner;
                self.nav.online = false;
                self.nav.offline_banner = true;
                if changed {
                    tracing::warn!("connection lost");
                }
                changed
            }
            ShellEvent::DismissOffline => {
                let changed = self.nav.offline_banner;
                self.nav.offline_banner = false;
                changed
            }
            ShellEvent::ToggleMenu => {
                self.nav.menu_open = !self.nav.menu_open;
                true
            }
            ShellEvent::ToggleTheme => {
                if let Err(err) = self.theme.toggle(&mut self.document) {
                    tracing::warn!(error = %format!("{err:#}"), "theme change not persisted");
                }
                true
            }
            ShellEvent::CountdownTick { generation } => self.countdown_tick(generation),
            ShellEvent::FeedSettled {
                generation,
                items,
                source,
            } => {
                if generation != self.generation {
                    return false;
                }
                let PageState::Home(home) = &mut self.page else {
                    return false;
                };
                home.feed = FeedState::Ready { items, source };
                home.fetch = None;
                true
            }
            ShellEvent::SubmitContact(form) => self.submit_contact(form),
            ShellEvent::ContactSettled {
                generation,
                outcome,
            } => self.contact_settled(generation, outcome),
            ShellEvent::ContactMessageExpired {
                generation,
                submission,
            } => {
                if generation != self.generation {
                    return false;
                }
                let PageState::Contact(contact) = &mut self.page else {
                    return false;
                };
                if submission != contact.submission || !contact.state.show_result {
                    return false;
                }
                contact.state.show_result = false;
                contact.hide_timer = None;
                true
            }
        }
    }

    /// One-line state description.
    pub fn summary(&self) -> String {
        let nav = &self.nav;
        let mut line = format!(
            "route={} title={:?} loading={} menu={} scrolled={} online={} banner={} theme={}",
            nav.route.path(),
            self.document.title,
            nav.loading,
            if nav.menu_open { "open" } else { "closed" },
            nav.scrolled,
            nav.online,
            nav.offline_banner,
            self.theme.mode().as_str(),
        );
        match &self.page {
            PageState::Home(home) => {
                if let Some(countdown) = &home.countdown {
                    line.push_str(&format!(" countdown={}", countdown.state().display()));
                }
                match &home.feed {
                    FeedState::Loading => line.push_str(" feed=loading"),
                    FeedState::Ready { items, source } => {
                        line.push_str(&format!(" feed={}({:?})", items.len(), source));
                    }
                }
            }
            PageState::Contact(contact) => {
                line.push_str(&format!(" submitting={}", contact.state.submitting));
                if let Some(message) = contact.state.visible_message() {
                    line.push_str(&format!(" message={message:?}"));
                }
            }
            PageState::Static => {}
        }
        line
    }

    fn navigate(&mut self, path: &str) -> bool {
        let route = Route::resolve(path);
        let canonical = path.trim().trim_end_matches('/');
        if route == self.nav.route && canonical.eq_ignore_ascii_case(&route.path()) {
            tracing::debug!(path, "already on route");
            return false;
        }
        if !canonical.eq_ignore_ascii_case(&route.path()) {
            tracing::debug!(path, to = %route.path(), "redirecting");
        }
        self.enter(route);
        true
    }

    fn enter(&mut self, route: Route) {
        self.generation += 1;
        let generation = self.generation;

        self.nav.route = route;
        self.nav.loading = true;
        self.nav.menu_open = false;
        self.nav.scrolled = false;
        self.document.scroll_to_top();
        self.document.title = route.page_title(&self.config.site_name);

        self.loading_timer = Some(ScheduledTask::after(
            self.config.loading_delay,
            self.tx.clone(),
            ShellEvent::LoadingElapsed { generation },
        ));
        self.page = self.mount(route, generation);
        tracing::info!(route = %route.path(), generation, "navigated");
    }

    fn mount(&self, route: Route, generation: u64) -> PageState {
        match route {
            Route::Home => PageState::Home(self.mount_home(generation)),
            Route::Contact => PageState::Contact(ContactPage::default()),
            Route::About | Route::Events | Route::Team => PageState::Static,
        }
    }

    fn mount_home(&self, generation: u64) -> HomePage {
        let countdown = self
            .config
            .countdown_target
            .map(|target| Countdown::start(target, self.clock.now()));
        let ticker = countdown
            .as_ref()
            .filter(|c| !c.state().ended)
            .map(|_| {
                ScheduledTask::every(COUNTDOWN_PERIOD, self.tx.clone(), move || {
                    ShellEvent::CountdownTick { generation }
                })
            });

        let fetcher = self.fetcher.clone();
        let url = self.config.feed_url.clone();
        let tx = self.tx.clone();
        let fetch = ScheduledTask::spawn(async move {
            let (items, source) = feed::load(&fetcher, &url).await;
            let _ = tx.send(ShellEvent::FeedSettled {
                generation,
                items,
                source,
            });
        });

        HomePage {
            countdown,
            feed: FeedState::Loading,
            ticker,
            fetch: Some(fetch),
        }
    }

    fn countdown_tick(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        let now = self.clock.now();
        let PageState::Home(home) = &mut self.page else {
            return false;
        };
        let Some(countdown) = home.countdown.as_mut() else {
            return false;
        };
        let before = countdown.state();
        let after = countdown.tick(now);
        if after.ended {
            home.ticker = None;
        }
        before != after
    }

    fn submit_contact(&mut self, form: ContactForm) -> bool {
        let generation = self.generation;
        let PageState::Contact(contact) = &mut self.page else {
            tracing::warn!("contact submission outside the contact view ignored");
            return false;
        };
        if contact.state.submitting {
            tracing::debug!("submission already in flight");
            return false;
        }
        contact.state.form = form;
        if let Err(err) = contact.state.form.validate() {
            tracing::warn!(error = %err, "contact form incomplete");
            return true;
        }

        contact.state.submitting = true;
        contact.submission += 1;
        let fetcher = self.fetcher.clone();
        let relay = self.config.relay_url.clone();
        let form = contact.state.form.clone();
        let tx = self.tx.clone();
        contact.request = Some(ScheduledTask::spawn(async move {
            let outcome = contact::submit(&fetcher, &relay, &form).await;
            let _ = tx.send(ShellEvent::ContactSettled {
                generation,
                outcome,
            });
        }));
        true
    }

    fn contact_settled(&mut self, generation: u64, outcome: SubmitOutcome) -> bool {
        if generation != self.generation {
            return false;
        }
        let PageState::Contact(contact) = &mut self.page else {
            return false;
        };
        if !contact.state.submitting {
            return false;
        }
        contact.state.settle(outcome);
        contact.request = None;
        contact.hide_timer = Some(ScheduledTask::after(
            self.config.message_duration,
            self.tx.clone(),
            ShellEvent::ContactMessageExpired {
                generation,
                submission: contact.submission,
            },
        ));
        true
    }
}

/// A shell together with the queue its timers and requests report into.
pub struct App<S> {
    shell: Shell<S>,
    rx: UnboundedReceiver<ShellEvent>,
}

impl<S: KvStore> App<S> {
    pub fn start(
        config: Arc<SiteConfig>,
        fetcher: Fetcher,
        clock: Arc<dyn Clock>,
        store: S,
        path: &str,
    ) -> anyhow::Result<Self> {
        let (tx, rx) = channel();
        let shell = Shell::start(config, fetcher, clock, store, tx, path)?;
        Ok(Self { shell, rx })
    }

    pub fn shell(&self) -> &Shell<S> {
        &self.shell
    }

    /// Applies a user event immediately.
    pub fn dispatch(&mut self, event: ShellEvent) -> bool {
        self.shell.handle(event)
    }

    /// Waits for the next queued event and applies it.
    pub async fn step(&mut self) -> Option<bool> {
        let event = self.rx.recv().await?;
        Some(self.shell.handle(event))
    }

    /// Applies the next queued event if one is already waiting.
    pub fn try_step(&mut self) -> Option<bool> {
        let event = self.rx.try_recv().ok()?;
        Some(self.shell.handle(event))
    }

    /// Processes queued events until nothing is outstanding.
    pub async fn settle(&mut self) {
        while !self.shell.is_settled() {
            if self.step().await.is_none() {
                break;
            }
        }
    }

    pub fn into_parts(self) -> (Shell<S>, UnboundedReceiver<ShellEvent>) {
        (self.shell, self.rx)
    }
}
