//! Drives a [`Gesture`] from a [`Host`]: listener registration, the deferred
//! refresh operation and the reset once it settles.
//!
//! Everything runs on one thread. The only re-entrancy guard is the gesture
//! staying in `refreshing` until the operation's [`Completion`] settles.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::config::{Config, ConfigError};
use crate::state::{
    Gesture, GestureSnapshot, GestureState, Presenter, Release, ScrollNode, Start, TouchInput, TouchKind,
};

pub type Handler<N> = Rc<dyn Fn(&dyn TouchInput<Node = N>)>;

/// The environment a pull-to-refresh lives in: an event source plus one-shot timers.
pub trait Host: 'static {
    type Node: ScrollNode + 'static;
    /// Handle returned by [`Host::listen`], given back to [`Host::unlisten`].
    type Listener;
    type Timer;
    type Error: std::error::Error;

    /// Register `handler` for `kind`. Move listeners must be able to suppress default scrolling.
    fn listen(&self, kind: TouchKind, handler: Handler<Self::Node>) -> Result<Self::Listener, Self::Error>;
    fn unlisten(&self, listener: Self::Listener);
    /// Run `callback` once after `delay_ms`. Must not run it before returning.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<Self::Timer, Self::Error>;
    fn clear_timeout(&self, timer: Self::Timer);
}

/// Handed to the refresh operation. Settles the gesture when finished or dropped.
pub struct Completion {
    settle: Option<Box<dyn FnOnce()>>,
}

impl Completion {
    pub fn new(settle: impl FnOnce() + 'static) -> Self {
        Self { settle: Some(Box::new(settle)) }
    }

    pub fn finish(mut self) {
        if let Some(settle) = self.settle.take() {
            settle();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        // an operation that bails out early still counts as finished
        if let Some(settle) = self.settle.take() {
            settle();
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion").field("settled", &self.settle.is_none()).finish()
    }
}

struct Machine<H: Host> {
    gesture: Gesture<H::Node>,
    presenter: Box<dyn Presenter>,
    timer: Option<H::Timer>,
    cycle: u64,
}

struct Inner<H: Host> {
    host: H,
    config: Rc<Config>,
    machine: RefCell<Machine<H>>,
    listeners: RefCell<Vec<H::Listener>>,
}

/// A pull-to-refresh gesture bound to a host.
pub struct PullToRefresh<H: Host> {
    inner: Rc<Inner<H>>,
}

impl<H: Host> PullToRefresh<H> {
    /// `trigger` is the region a touch must start in; `presenter` receives every indicator change.
    pub fn new(
        config: Config,
        host: H,
        trigger: H::Node,
        presenter: impl Presenter + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Rc::new(config);
        let machine = Machine {
            gesture: Gesture::new(config.clone(), trigger),
            presenter: Box::new(presenter),
            timer: None,
            cycle: 0,
        };
        Ok(Self {
            inner: Rc::new(Inner {
                host,
                config,
                machine: RefCell::new(machine),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn state(&self) -> GestureState {
        self.inner.machine.borrow().gesture.state()
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        self.inner.machine.borrow().gesture.snapshot()
    }

    pub fn is_attached(&self) -> bool {
        !self.inner.listeners.borrow().is_empty()
    }

    /// Register the touch listeners. Does nothing if already attached.
    pub fn attach(&self) -> Result<(), H::Error> {
        if self.is_attached() {
            return Ok(());
        }
        let mut listeners = Vec::with_capacity(TouchKind::ALL.len());
        for kind in TouchKind::ALL {
            let weak = Rc::downgrade(&self.inner);
            let handler: Handler<H::Node> = Rc::new(move |event: &dyn TouchInput<Node = H::Node>| {
                if let Some(inner) = weak.upgrade() {
                    inner.dispatch(kind, event);
                }
            });
            match self.inner.host.listen(kind, handler) {
                Ok(listener) => listeners.push(listener),
                Err(err) => {
                    for listener in listeners {
                        self.inner.host.unlisten(listener);
                    }
                    return Err(err);
                }
            }
        }
        debug!("pull-to-refresh attached");
        *self.inner.listeners.borrow_mut() = listeners;
        Ok(())
    }

    /// Remove the touch listeners. The current state is kept as is.
    pub fn detach(&self) {
        let listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        if listeners.is_empty() {
            return;
        }
        for listener in listeners {
            self.inner.host.unlisten(listener);
        }
        debug!("pull-to-refresh detached");
    }

    /// Feed one event into the machine, as the registered listeners do.
    pub fn dispatch(&self, kind: TouchKind, event: &dyn TouchInput<Node = H::Node>) {
        self.inner.dispatch(kind, event);
    }
}

impl<H: Host> Drop for PullToRefresh<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<H: Host> Inner<H> {
    fn dispatch(self: &Rc<Self>, kind: TouchKind, event: &dyn TouchInput<Node = H::Node>) {
        let mut guard = self.machine.borrow_mut();
        let machine = &mut *guard;
        let presenter = machine.presenter.as_mut();
        let release = match kind {
            TouchKind::Start => {
                if machine.gesture.touch_start(event, presenter) == Start::Armed {
                    if let Some(timer) = machine.timer.take() {
                        self.host.clear_timeout(timer);
                    }
                }
                return;
            }
            TouchKind::Move => {
                machine.gesture.touch_move(event, presenter);
                return;
            }
            TouchKind::End => machine.gesture.touch_end(presenter),
            TouchKind::Cancel => machine.gesture.touch_cancel(presenter),
        };
        if release == Release::Refresh {
            machine.cycle += 1;
            let cycle = machine.cycle;
            drop(guard);
            self.schedule(cycle);
        }
    }

    fn schedule(self: &Rc<Self>, cycle: u64) {
        let weak = Rc::downgrade(self);
        let delay = self.config.tunables.refresh_delay_ms;
        let fire = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.run_refresh(cycle);
            }
        });
        match self.host.set_timeout(delay, fire) {
            Ok(timer) => self.machine.borrow_mut().timer = Some(timer),
            Err(err) => {
                warn!(%err, "could not schedule refresh, resetting");
                self.settle(cycle);
            }
        }
    }

    fn run_refresh(self: &Rc<Self>, cycle: u64) {
        {
            let mut machine = self.machine.borrow_mut();
            machine.timer = None;
            if machine.cycle != cycle || machine.gesture.state() != GestureState::Refreshing {
                trace!(cycle, "stale refresh timer");
                return;
            }
        }
        debug!(cycle, "invoking refresh operation");
        let weak: Weak<Self> = Rc::downgrade(self);
        let completion = Completion::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.settle(cycle);
            }
        });
        self.config.refresh(completion);
    }

    fn settle(&self, cycle: u64) {
        let mut guard = self.machine.borrow_mut();
        let machine = &mut *guard;
        if machine.cycle != cycle || machine.gesture.state() != GestureState::Refreshing {
            trace!(cycle, "ignoring stale completion");
            return;
        }
        debug!(cycle, "refresh settled");
        machine.gesture.reset(machine.presenter.as_mut());
    }
}
