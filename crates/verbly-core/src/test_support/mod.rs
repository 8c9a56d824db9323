//! In-memory database fixture shared by the SQLite-backed tests.
//!
//! Notions: 1 dog, 2 canine, 3 animal (nouns; hypernymy 1 -> 2 -> 3),
//! 4 run (verb), 5 happy, 6 sad (adjectives).
//!
//! Words: 1 happy, 2 glad, 3 sad, 4 joyful, 5 cheerful, 6 dog, 7 canine,
//! 8 animal, 9 run. Synonymy pairs happy with glad and joyful both ways,
//! plus the one-way (cheerful, happy); antonymy pairs happy and sad.

use crate::{
    db::{Database, filter::Filter, order::Order},
    entity::{Entity, Word},
};
use rusqlite::Connection;

pub(crate) const SCHEMA: &str = "
CREATE TABLE notions (
    notion_id INTEGER PRIMARY KEY,
    part_of_speech INTEGER NOT NULL,
    wnid INTEGER,
    images INTEGER
);
CREATE TABLE words (
    word_id INTEGER PRIMARY KEY,
    notion_id INTEGER NOT NULL,
    lemma_id INTEGER NOT NULL,
    tag_count INTEGER,
    position INTEGER,
    group_id INTEGER
);
CREATE TABLE groups (group_id INTEGER PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE frames (
    frame_id INTEGER PRIMARY KEY,
    group_id INTEGER NOT NULL,
    data TEXT NOT NULL
);
CREATE TABLE parts (
    part_id INTEGER PRIMARY KEY,
    frame_id INTEGER NOT NULL,
    part_index INTEGER NOT NULL,
    part_type INTEGER NOT NULL,
    role TEXT,
    value TEXT
);
CREATE TABLE forms (
    form_id INTEGER PRIMARY KEY,
    form TEXT NOT NULL,
    complexity INTEGER NOT NULL,
    proper INTEGER NOT NULL,
    length INTEGER NOT NULL
);
CREATE TABLE pronunciations (
    pronunciation_id INTEGER PRIMARY KEY,
    phonemes TEXT NOT NULL,
    prerhyme TEXT,
    rhyme TEXT,
    syllables INTEGER NOT NULL,
    stress TEXT NOT NULL
);
CREATE TABLE lemmas_forms (lemma_id INTEGER, form_id INTEGER, category INTEGER);
CREATE TABLE forms_pronunciations (form_id INTEGER, pronunciation_id INTEGER);
CREATE TABLE synonymy (word_1_id INTEGER, word_2_id INTEGER);
CREATE TABLE antonymy (antonym_1_id INTEGER, antonym_2_id INTEGER);
CREATE TABLE pertainymy (noun_id INTEGER, pertainym_id INTEGER);
CREATE TABLE hypernymy (hyponym_id INTEGER, hypernym_id INTEGER);
CREATE TABLE instantiation (class_id INTEGER, instance_id INTEGER);
CREATE TABLE member_meronymy (holonym_id INTEGER, meronym_id INTEGER);
CREATE TABLE part_meronymy (holonym_id INTEGER, meronym_id INTEGER);
CREATE TABLE substance_meronymy (holonym_id INTEGER, meronym_id INTEGER);
CREATE TABLE entailment (given_id INTEGER, entailment_id INTEGER);
CREATE TABLE causality (effect_id INTEGER, cause_id INTEGER);
CREATE TABLE similarity (adjective_1_id INTEGER, adjective_2_id INTEGER);
";

pub(crate) const DATA: &str = "
INSERT INTO notions VALUES
    (1, 0, 2084071, 12),
    (2, 0, 2083346, NULL),
    (3, 0, 15388, 40),
    (4, 3, NULL, NULL),
    (5, 1, NULL, NULL),
    (6, 1, NULL, NULL);

INSERT INTO hypernymy VALUES (1, 2), (2, 3);

INSERT INTO words VALUES
    (1, 5, 1, 10, NULL, NULL),
    (2, 5, 2, 4, NULL, NULL),
    (3, 6, 3, 7, NULL, NULL),
    (4, 5, 4, NULL, NULL, NULL),
    (5, 5, 5, 2, NULL, NULL),
    (6, 1, 6, 20, NULL, NULL),
    (7, 2, 7, 1, NULL, NULL),
    (8, 3, 8, 5, NULL, NULL),
    (9, 4, 9, 3, NULL, 1);

INSERT INTO synonymy VALUES (1, 2), (2, 1), (1, 4), (4, 1), (5, 1);
INSERT INTO antonymy VALUES (1, 3), (3, 1);

INSERT INTO forms VALUES
    (1, 'happy', 1, 0, 5),
    (2, 'glad', 1, 0, 4),
    (3, 'sad', 1, 0, 3),
    (4, 'joyful', 1, 0, 6),
    (5, 'cheerful', 1, 0, 8),
    (6, 'dog', 1, 0, 3),
    (7, 'dogs', 1, 0, 4),
    (8, 'canine', 1, 0, 6),
    (9, 'animal', 1, 0, 6),
    (10, 'run', 1, 0, 3),
    (11, 'happier', 1, 0, 7),
    (12, 'sappy', 1, 0, 5),
    (13, 'frog', 1, 0, 4);

INSERT INTO lemmas_forms VALUES
    (1, 1, 0), (1, 11, 2),
    (2, 2, 0), (3, 3, 0), (4, 4, 0), (5, 5, 0),
    (6, 6, 0), (6, 7, 1),
    (7, 8, 0), (8, 9, 0), (9, 10, 0);

INSERT INTO pronunciations VALUES
    (1, 'HH AE1 P IY0', 'HH', 'AE1 P IY0', 2, '10'),
    (2, 'S AE1 P IY0', 'S', 'AE1 P IY0', 2, '10'),
    (3, 'D AO1 G', 'D', 'AO1 G', 1, '1'),
    (4, 'F R AO1 G', 'F R', 'AO1 G', 1, '1'),
    (5, 'G L AE1 D', 'G L', 'AE1 D', 1, '1');

INSERT INTO forms_pronunciations VALUES (1, 1), (12, 2), (6, 3), (13, 4), (2, 5);

INSERT INTO groups VALUES (1, 'run-51.3.2');
INSERT INTO frames VALUES (1, 1, 'NP V'), (2, 1, 'NP V PP');
INSERT INTO parts VALUES
    (1, 1, 0, 0, 'Agent', NULL),
    (2, 1, 1, 1, NULL, NULL),
    (3, 2, 0, 0, 'Theme', NULL),
    (4, 2, 1, 1, NULL, NULL),
    (5, 2, 2, 2, NULL, 'to');
";

///
/// Fixture
///

pub(crate) struct Fixture {
    pub(crate) db: Database,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        conn.execute_batch(SCHEMA).expect("create schema");
        conn.execute_batch(DATA).expect("load fixture rows");

        Self {
            db: Database::from_connection(conn),
        }
    }

    /// Every `E` matching `filter`, by ascending id.
    pub(crate) fn ids<E: Entity>(&self, filter: &Filter) -> Vec<i64> {
        let mut query = self
            .db
            .query::<E>(filter, Order::ascending(E::ID), None)
            .expect("compile query");

        query.all().expect("execute query").ids()
    }

    /// Run hand-written SQL returning one integer column.
    pub(crate) fn raw_ids(&self, sql: &str) -> Vec<i64> {
        let conn = self.db.connection();
        let mut statement = conn.prepare(sql).expect("prepare raw sql");
        let rows = statement
            .query_map([], |row| row.get::<_, i64>(0))
            .expect("run raw sql");

        let mut ids = rows.collect::<Result<Vec<_>, _>>().expect("read raw rows");
        ids.sort_unstable();
        ids
    }

    pub(crate) fn word(&self, id: i64) -> Word {
        self.one(id)
    }

    pub(crate) fn one<E: Entity>(&self, id: i64) -> E {
        let filter = E::ID.eq(id).expect("identity filter");
        let mut query = self
            .db
            .query::<E>(&filter, Order::Random, None)
            .expect("compile query");

        query.first().expect("fixture row")
    }
}
