use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        -- Configuración local del cliente
        CREATE TABLE IF NOT EXISTS config (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Sesión persistida (una sola fila)
        CREATE TABLE IF NOT EXISTS sesion (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            access_token TEXT NOT NULL,
            refresh_token TEXT NOT NULL,
            usuario_json TEXT NOT NULL,
            actualizado TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );
        ",
    )?;

    // Valores por defecto (no sobreescribe los existentes)
    conn.execute_batch(
        "
        INSERT OR IGNORE INTO config (key, value) VALUES ('timeout_secs', '30');
        INSERT OR IGNORE INTO config (key, value) VALUES ('page_size', '20');
        ",
    )?;

    Ok(())
}
