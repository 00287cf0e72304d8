use std::path::PathBuf;

use uuid::Uuid;

use crate::core::note::{Note, NoteColor};

/// Where the collection came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Read back from the notes file.
    Persisted,
    /// File absent or empty; seeded with the demo notes.
    Seeded,
    /// File present but unreadable; seeded, and the caller should tell
    /// the user their notes could not be loaded.
    Recovered,
}

/// The in-memory note collection. Every mutation rewrites the whole
/// JSON file; nothing is written until `load` has run, so a slow start
/// can never clobber persisted notes with an empty collection.
pub struct NoteStore {
    notes: Vec<Note>,
    path: PathBuf,
    loaded: bool,
}

impl NoteStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            notes: Vec::new(),
            path,
            loaded: false,
        }
    }

    pub fn load(&mut self) -> LoadOutcome {
        self.loaded = true;
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) if !notes.is_empty() => {
                    self.notes = notes;
                    LoadOutcome::Persisted
                }
                Ok(_) => {
                    self.notes = demo_notes();
                    LoadOutcome::Seeded
                }
                Err(e) => {
                    log::error!("Discarding unreadable notes file: {}", e);
                    self.notes = demo_notes();
                    LoadOutcome::Recovered
                }
            },
            Err(_) => {
                self.notes = demo_notes();
                LoadOutcome::Seeded
            }
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Pure projection for the dashboard's "Pinned" section.
    pub fn pinned(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.is_pinned).collect()
    }

    pub fn unpinned(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| !n.is_pinned).collect()
    }

    /// Prepend a new note; fresh notes sort first until the pinned
    /// partition reorders the view.
    pub fn add(&mut self, note: Note) -> Result<(), String> {
        self.notes.insert(0, note);
        self.save()
    }

    /// Replace the record with a matching id, keeping the stored `id`
    /// and `created_at` regardless of what the input carries. No-op when
    /// the id is unknown.
    pub fn edit(&mut self, note: Note) -> Result<(), String> {
        let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) else {
            return Ok(());
        };
        let id = existing.id;
        let created_at = existing.created_at;
        *existing = note;
        existing.id = id;
        existing.created_at = created_at;
        self.save()
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), String> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Ok(());
        }
        self.save()
    }

    pub fn toggle_pin(&mut self, id: Uuid) -> Result<(), String> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(());
        };
        note.is_pinned = !note.is_pinned;
        self.save()
    }

    pub fn cycle_color(&mut self, id: Uuid) -> Result<(), String> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(());
        };
        note.color = note.color.next();
        self.save()
    }

    fn save(&self) -> Result<(), String> {
        if !self.loaded {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.notes)
            .map_err(|e| format!("Failed to serialize notes: {}", e))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&self.path, json).map_err(|e| {
            log::error!("Failed to save notes: {}", e);
            format!("Failed to save notes: {}", e)
        })
    }
}

/// The two-note starter set shown when nothing usable is on disk.
pub fn demo_notes() -> Vec<Note> {
    let mut welcome = Note::new(
        "Welcome to Quill! 🎉",
        "Take notes, manage logins, and keep track of your sessions.",
    );
    welcome.labels = vec!["welcome".to_string(), "user".to_string()];
    welcome.color = NoteColor::Blue;
    welcome.is_pinned = true;

    let mut tips = Note::new(
        "Quick Tips",
        "Pin important notes, organize by color, and never lose your tasks.",
    );
    tips.labels = vec!["tips".to_string(), "productivity".to_string()];
    tips.color = NoteColor::Yellow;

    vec![welcome, tips]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::parse_labels;

    fn temp_store() -> NoteStore {
        let dir = std::env::temp_dir().join(format!("quill-notes-test-{}", Uuid::new_v4()));
        NoteStore::new(dir.join("notes.json"))
    }

    fn loaded_store() -> NoteStore {
        let mut store = temp_store();
        store.load();
        store
    }

    #[test]
    fn fresh_store_seeds_demo_notes() {
        let mut store = temp_store();
        assert_eq!(store.load(), LoadOutcome::Seeded);
        assert_eq!(store.len(), 2);
        assert_eq!(store.pinned().len(), 1);
    }

    #[test]
    fn add_assigns_and_prepends() {
        let mut store = loaded_store();
        let mut note = Note::new("Hi", "Body");
        note.labels = parse_labels("x, y");
        let id = note.id;

        store.add(note).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.notes()[0].id, id);
        assert_eq!(store.notes()[0].labels, vec!["x", "y"]);
    }

    #[test]
    fn edit_replaces_fields_but_keeps_identity() {
        let mut store = loaded_store();
        let original = store.notes()[0].clone();

        let mut updated = original.clone();
        updated.title = "Changed".to_string();
        updated.created_at = chrono::Local::now().naive_local() + chrono::Duration::days(1);
        store.edit(updated).unwrap();

        let stored = store.get(original.id).unwrap();
        assert_eq!(stored.title, "Changed");
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.id, original.id);
    }

    #[test]
    fn edit_unknown_id_is_a_noop() {
        let mut store = loaded_store();
        let before: Vec<Note> = store.notes().to_vec();
        store.edit(Note::new("Ghost", "Nothing")).unwrap();
        assert_eq!(store.notes(), &before[..]);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = loaded_store();
        let id = store.notes()[0].id;
        let n = store.len();

        store.delete(id).unwrap();
        assert_eq!(store.len(), n - 1);
        assert!(store.get(id).is_none());

        // Absent id: no-op.
        store.delete(id).unwrap();
        assert_eq!(store.len(), n - 1);
    }

    #[test]
    fn toggle_pin_twice_is_idempotent() {
        let mut store = loaded_store();
        let id = store.notes()[0].id;
        let pinned = store.get(id).unwrap().is_pinned;

        store.toggle_pin(id).unwrap();
        assert_eq!(store.get(id).unwrap().is_pinned, !pinned);
        store.toggle_pin(id).unwrap();
        assert_eq!(store.get(id).unwrap().is_pinned, pinned);
    }

    #[test]
    fn cycling_through_the_whole_palette_restores_the_color() {
        let mut store = loaded_store();
        let id = store.notes()[0].id;
        let color = store.get(id).unwrap().color;

        for _ in 0..NoteColor::ALL.len() {
            store.cycle_color(id).unwrap();
        }
        assert_eq!(store.get(id).unwrap().color, color);
    }

    #[test]
    fn persisted_collection_reloads_deep_equal() {
        let mut store = loaded_store();
        let mut note = Note::new("Round", "Trip");
        note.labels = vec!["a".to_string()];
        note.color = NoteColor::Green;
        store.add(note).unwrap();
        let saved: Vec<Note> = store.notes().to_vec();

        let mut reloaded = NoteStore::new(store.path.clone());
        assert_eq!(reloaded.load(), LoadOutcome::Persisted);
        assert_eq!(reloaded.notes(), &saved[..]);
    }

    #[test]
    fn corrupt_blob_falls_back_to_demo_set() {
        let store = temp_store();
        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, "{not json").unwrap();

        let mut store = store;
        assert_eq!(store.load(), LoadOutcome::Recovered);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_array_seeds_demo_set() {
        let store = temp_store();
        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, "[]").unwrap();

        let mut store = store;
        assert_eq!(store.load(), LoadOutcome::Seeded);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn nothing_is_written_before_the_initial_load() {
        let mut store = temp_store();
        store.add(Note::new("Early", "Bird")).unwrap();
        assert!(!store.path.exists());

        // After load, mutations persist as usual.
        store.load();
        store.add(Note::new("Late", "Riser")).unwrap();
        assert!(store.path.exists());
    }
}
