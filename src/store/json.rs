use std::{
    fs::{
        self,
        File
    },
    io::{
        self,
        BufReader,
        BufWriter,
        prelude::*
    },
    path::PathBuf
};
use log::debug;
use crate::{
    game::{
        Player,
        PlayerId,
        Role,
        RoleId
    },
    store::{
        Records,
        Store,
        StoreError
    }
};

/// A store backed by a JSON file. The whole file is rewritten after every change.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: Records
}

impl JsonStore {
    /// Loads the records from the given file. A missing file is treated as an empty store and created on the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<JsonStore, StoreError> {
        let path = path.into();
        let records = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Records::default(),
            Err(e) => return Err(e.into())
        };
        debug!("loaded {} players and {} roles from {}", records.players.len(), records.roles.len(), path.display());
        Ok(JsonStore { path, records })
    }

    fn save(&self) -> Result<(), StoreError> {
        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &self.records)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn commit<T>(&mut self, change: impl FnOnce(&mut Records) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut records = self.records.clone();
        let result = change(&mut records)?;
        let previous = std::mem::replace(&mut self.records, records);
        if let Err(e) = self.save() {
            self.records = previous;
            return Err(e);
        }
        Ok(result)
    }
}

impl Store for JsonStore {
    fn players(&self) -> Vec<Player> {
        self.records.players.clone()
    }

    fn roles(&self) -> Vec<Role> {
        self.records.roles.clone()
    }

    fn insert_player(&mut self, player: Player) -> Result<(), StoreError> {
        self.commit(|records| records.insert_player(player))
    }

    fn delete_player(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        self.commit(|records| records.delete_player(id))
    }

    fn insert_role(&mut self, role: Role) -> Result<(), StoreError> {
        self.commit(|records| records.insert_role(role))
    }

    fn delete_role(&mut self, id: &RoleId) -> Result<Role, StoreError> {
        self.commit(|records| records.delete_role(id))
    }

    fn increment_wins(&mut self, id: &PlayerId) -> Result<u32, StoreError> {
        self.commit(|records| records.increment_wins(id))
    }
}
