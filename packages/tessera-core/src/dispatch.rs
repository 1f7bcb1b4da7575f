use crate::element::Element;
use crate::event::Event;
use crate::layout::{LayoutId, LayoutTree};
use crate::surface::SoundOutput;
use smallvec::SmallVec;

impl LayoutTree {
    /// Entry point for the event pump: feeds `event` to the root.
    /// Returns true when some button consumed it.
    pub fn dispatch(&mut self, event: &Event, sound: &mut dyn SoundOutput) -> bool {
        self.handle_event(self.root(), event, sound)
    }

    pub fn handle_event(
        &mut self,
        id: LayoutId,
        event: &Event,
        sound: &mut dyn SoundOutput,
    ) -> bool {
        match event {
            Event::Click { .. } => self.handle_click(id, event, sound),
            Event::Show { .. } => {
                self.handle_show(id, event);
                false
            }
            // Only the root acts on sounds; everyone else forwards.
            Event::Sound { .. } => {
                self.propagate_event_up(id, event, sound);
                false
            }
        }
    }

    /// Walks parent links from `id` to the root, where side effects run.
    pub fn propagate_event_up(&self, id: LayoutId, event: &Event, sound: &mut dyn SoundOutput) {
        let mut at = id;
        while let Some(parent) = self.parent(at) {
            at = parent;
        }
        if at != self.root() {
            tracing::warn!("Event {:?} reached detached node {:?}", event.kind(), at);
            return;
        }

        if let Event::Sound { name } = event {
            match name.as_deref() {
                Some(name) => {
                    if sound.load_sound(name) {
                        tracing::info!("Playing sound '{}'", name);
                        sound.play_sound();
                    } else {
                        tracing::warn!("Sound '{}' could not be loaded", name);
                    }
                }
                None => {
                    tracing::info!("Playing loaded sound");
                    sound.play_sound();
                }
            }
        }
    }

    fn handle_click(&mut self, id: LayoutId, event: &Event, sound: &mut dyn SoundOutput) -> bool {
        let (hit, children) = {
            let Some(node) = self.nodes.get_mut(id) else {
                return false;
            };
            let local = event.relative_to(node.start);
            // First button to consume the click wins; later elements never see it.
            let hit = node
                .elements
                .iter_mut()
                .filter_map(Element::as_button_mut)
                .find_map(|button| {
                    button
                        .handle_event(&local)
                        .then(|| (button.target.clone(), button.sound.clone()))
                });
            (hit, node.children.clone())
        };

        if let Some((target, sound_name)) = hit {
            tracing::debug!("Click consumed by a button in {:?}", id);
            if let Some(target) = self.resolve_target(id, target.as_deref()) {
                let active = !self.is_active(target);
                self.nodes[target].active = active;
                self.nodes[id].click_toggled = active;
            }
            self.propagate_event_up(id, &Event::Sound { name: sound_name }, sound);
            return true;
        }

        let mut consumed = false;
        for child in children {
            consumed |= self.handle_click(child, event, sound);
        }
        consumed
    }

    fn handle_show(&mut self, id: LayoutId, event: &Event) {
        let (targets, latched, children) = {
            let Some(node) = self.nodes.get(id) else {
                return;
            };
            let local = event.relative_to(node.start);

            let mut targets: SmallVec<[(Option<String>, bool); 4]> = SmallVec::new();
            for button in node
                .elements
                .iter()
                .filter_map(Element::as_button)
                .filter(|b| b.hoverable)
            {
                let hovered = button.handle_hover(&local);
                match targets.iter_mut().find(|(t, _)| *t == button.target) {
                    Some(entry) => entry.1 |= hovered,
                    None => targets.push((button.target.clone(), hovered)),
                }
            }
            (targets, node.click_toggled, node.children.clone())
        };

        if !latched {
            for (target, hovered) in targets {
                if let Some(target) = self.resolve_target(id, target.as_deref()) {
                    self.nodes[target].active = hovered;
                }
            }
        }

        for child in children {
            self.handle_show(child, event);
        }
    }

    /// Layout addressed by a button: by name anywhere in the tree, or the
    /// first nested layout of `owner` when the button names none.
    fn resolve_target(&self, owner: LayoutId, name: Option<&str>) -> Option<LayoutId> {
        match name {
            Some(name) => {
                let found = self.find_by_name(name);
                if found.is_none() {
                    tracing::warn!("Button in {:?} targets unknown layout '{}'", owner, name);
                }
                found
            }
            None => self.children(owner).first().copied(),
        }
    }
}
