//! SQLite-backed catalog store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use super::{
    CatalogStore, Genre, MovieFilter, MovieOrder, MovieUpsert, ShowUpsert, StoreError, StoredMovie,
    StoredShow,
};

/// SQLite-backed catalog store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- Cached movies (one row per provider id)
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tmdb_id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                overview TEXT,
                release_date TEXT,
                poster_path TEXT,
                backdrop_path TEXT,
                runtime INTEGER,
                vote_average REAL,
                original_title TEXT,
                last_synced_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title);
            CREATE INDEX IF NOT EXISTS idx_movies_vote_average ON movies(vote_average);

            -- Genre names are unique and case-sensitive as received upstream
            CREATE TABLE IF NOT EXISTS genres (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            -- Movie/genre associations, unique per pair
            CREATE TABLE IF NOT EXISTS movie_genres (
                movie_id INTEGER NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
                genre_id INTEGER NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
                UNIQUE(movie_id, genre_id)
            );

            CREATE INDEX IF NOT EXISTS idx_movie_genres_movie ON movie_genres(movie_id);

            -- Cached TV shows (one row per provider id)
            CREATE TABLE IF NOT EXISTS shows (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tmdb_id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL,
                overview TEXT,
                poster_path TEXT,
                backdrop_path TEXT,
                first_air_date TEXT,
                vote_average REAL,
                last_synced_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Convert a `movies` row to a StoredMovie.
    fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<StoredMovie> {
        let release_date: Option<String> = row.get(4)?;
        let last_synced_str: String = row.get(10)?;

        Ok(StoredMovie {
            id: row.get(0)?,
            tmdb_id: row.get(1)?,
            title: row.get(2)?,
            overview: row.get(3)?,
            release_date: release_date.and_then(|d| parse_date(&d)),
            poster_path: row.get(5)?,
            backdrop_path: row.get(6)?,
            runtime: row.get(7)?,
            vote_average: row.get(8)?,
            original_title: row.get(9)?,
            last_synced_at: parse_timestamp(&last_synced_str),
        })
    }

    /// Convert a `shows` row to a StoredShow.
    fn row_to_show(row: &rusqlite::Row) -> rusqlite::Result<StoredShow> {
        let first_air_date: Option<String> = row.get(6)?;
        let last_synced_str: String = row.get(8)?;

        Ok(StoredShow {
            id: row.get(0)?,
            tmdb_id: row.get(1)?,
            name: row.get(2)?,
            overview: row.get(3)?,
            poster_path: row.get(4)?,
            backdrop_path: row.get(5)?,
            first_air_date: first_air_date.and_then(|d| parse_date(&d)),
            vote_average: row.get(7)?,
            last_synced_at: parse_timestamp(&last_synced_str),
        })
    }
}

const MOVIE_COLUMNS: &str = "id, tmdb_id, title, overview, release_date, poster_path, \
                             backdrop_path, runtime, vote_average, original_title, last_synced_at";

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn order_sql(order: MovieOrder) -> &'static str {
    match order {
        // NULL sorts lowest in SQLite, so DESC puts unrated rows last
        MovieOrder::VoteAverageDesc => "vote_average DESC, id ASC",
        MovieOrder::IdAsc => "id ASC",
    }
}

impl CatalogStore for SqliteStore {
    fn find_movie(&self, tmdb_id: i64) -> Result<Option<StoredMovie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            &format!("SELECT {} FROM movies WHERE tmdb_id = ?", MOVIE_COLUMNS),
            params![tmdb_id],
            Self::row_to_movie,
        );

        match result {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn list_movies(
        &self,
        filter: &MovieFilter,
        order: MovieOrder,
        skip: u32,
        take: u32,
    ) -> Result<Vec<StoredMovie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let sql = match &filter.title {
            Some(_) => format!(
                "SELECT {} FROM movies \
                 WHERE title LIKE ?1 OR original_title LIKE ?1 \
                 ORDER BY {} LIMIT ?2 OFFSET ?3",
                MOVIE_COLUMNS,
                order_sql(order)
            ),
            None => format!(
                "SELECT {} FROM movies ORDER BY {} LIMIT ?1 OFFSET ?2",
                MOVIE_COLUMNS,
                order_sql(order)
            ),
        };

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut movies = Vec::new();
        let rows = match &filter.title {
            Some(title) => {
                let pattern = format!("%{}%", title);
                stmt.query_map(params![pattern, take, skip], Self::row_to_movie)
                    .map_err(|e| StoreError::Database(e.to_string()))?
                    .collect::<Result<Vec<_>, _>>()
            }
            None => stmt
                .query_map(params![take, skip], Self::row_to_movie)
                .map_err(|e| StoreError::Database(e.to_string()))?
                .collect::<Result<Vec<_>, _>>(),
        };

        for movie in rows.map_err(|e| StoreError::Database(e.to_string()))? {
            movies.push(movie);
        }
        Ok(movies)
    }

    fn count_movies(&self, filter: &MovieFilter) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();

        let count: u64 = match &filter.title {
            Some(title) => {
                let pattern = format!("%{}%", title);
                conn.query_row(
                    "SELECT COUNT(*) FROM movies WHERE title LIKE ?1 OR original_title LIKE ?1",
                    params![pattern],
                    |row| row.get(0),
                )
            }
            None => conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0)),
        }
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(count)
    }

    fn upsert_movie(&self, record: &MovieUpsert) -> Result<StoredMovie, StoreError> {
        {
            let conn = self.conn.lock().unwrap();
            let now_str = Utc::now().to_rfc3339();
            let release_date = record.release_date.map(|d| d.format("%Y-%m-%d").to_string());

            conn.execute(
                "INSERT INTO movies (tmdb_id, title, overview, release_date, poster_path, \
                                     backdrop_path, runtime, vote_average, original_title, last_synced_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(tmdb_id) DO UPDATE SET
                    title = excluded.title,
                    overview = excluded.overview,
                    release_date = excluded.release_date,
                    poster_path = excluded.poster_path,
                    backdrop_path = excluded.backdrop_path,
                    runtime = excluded.runtime,
                    vote_average = excluded.vote_average,
                    original_title = excluded.original_title,
                    last_synced_at = excluded.last_synced_at",
                params![
                    record.tmdb_id,
                    record.title,
                    record.overview,
                    release_date,
                    record.poster_path,
                    record.backdrop_path,
                    record.runtime,
                    record.vote_average,
                    record.original_title,
                    now_str,
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        self.find_movie(record.tmdb_id)?
            .ok_or_else(|| StoreError::NotFound(record.tmdb_id.to_string()))
    }

    fn ensure_genre(&self, name: &str) -> Result<Genre, StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute("INSERT OR IGNORE INTO genres (name) VALUES (?)", params![name])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        conn.query_row(
            "SELECT id, name FROM genres WHERE name = ?",
            params![name],
            |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn link_movie_genre(&self, movie_id: i64, genre_id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT OR IGNORE INTO movie_genres (movie_id, genre_id) VALUES (?, ?)",
            params![movie_id, genre_id],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn movie_genres(&self, movie_id: i64) -> Result<Vec<Genre>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT g.id, g.name FROM genres g \
                 JOIN movie_genres mg ON mg.genre_id = g.id \
                 WHERE mg.movie_id = ? ORDER BY g.id",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![movie_id], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut genres = Vec::new();
        for row in rows {
            genres.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(genres)
    }

    fn cache_shows(&self, records: &[ShowUpsert]) -> Result<u32, StoreError> {
        let conn = self.conn.lock().unwrap();
        let now_str = Utc::now().to_rfc3339();
        let mut new_count = 0;

        for record in records {
            let first_air_date = record
                .first_air_date
                .map(|d| d.format("%Y-%m-%d").to_string());

            let inserted = conn
                .execute(
                    "INSERT INTO shows (tmdb_id, name, overview, poster_path, backdrop_path, \
                                        first_air_date, vote_average, last_synced_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(tmdb_id) DO NOTHING",
                    params![
                        record.tmdb_id,
                        record.name,
                        record.overview,
                        record.poster_path,
                        record.backdrop_path,
                        first_air_date,
                        record.vote_average,
                        now_str,
                    ],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?;

            new_count += inserted as u32;
        }

        Ok(new_count)
    }

    fn list_shows(&self, skip: u32, take: u32) -> Result<Vec<StoredShow>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT id, tmdb_id, name, overview, poster_path, backdrop_path, \
                        first_air_date, vote_average, last_synced_at \
                 FROM shows ORDER BY id LIMIT ? OFFSET ?",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![take, skip], Self::row_to_show)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut shows = Vec::new();
        for row in rows {
            shows.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(shows)
    }
}
