//! Face command handlers
//!
//! Calls the face segmentation API of a running service.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use facecloud_client::FaceCloudClient;

use crate::config::Config;

/// Face subcommands
#[derive(Subcommand)]
pub enum FaceCommands {
    /// Show the greetings of the root and face segmentation applications
    Root,
    /// Check that the service is up
    Health,
    /// Mean skin colour of an image
    Colour {
        /// Image file (PNG or JPEG)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Segment the skin of an image
    Segment {
        /// Image file (PNG or JPEG)
        #[arg(short, long)]
        file: PathBuf,

        /// Where to write the segmented PNG
        #[arg(short, long, default_value = "segmented.png")]
        output: PathBuf,
    },
}

/// Handle face commands
pub async fn handle_face_command(command: FaceCommands, config: &Config) -> Result<()> {
    let client = FaceCloudClient::new(&config.api_url);

    match command {
        FaceCommands::Root => {
            println!("  {}", client.root().await?.bold());
            println!("  {}", client.face_segmentation_root().await?.bold());
            Ok(())
        }
        FaceCommands::Health => {
            client.health().await?;
            println!("{} {}", "✓ Service is up at".green(), client.base_url().cyan());
            Ok(())
        }
        FaceCommands::Colour { file } => mean_colour(&client, &file).await,
        FaceCommands::Segment { file, output } => segment(&client, &file, &output).await,
    }
}

async fn mean_colour(client: &FaceCloudClient, file: &Path) -> Result<()> {
    let (name, bytes) = read_image(file)?;
    let colour = client.mean_colour(name, bytes).await?;

    let [r, g, b] = colour
        .rgb()
        .context("API returned a colour without three channels")?;

    println!("{}", "Mean skin colour:".bold());
    println!("  R: {:.1}", r);
    println!("  G: {:.1}", g);
    println!("  B: {:.1}", b);
    println!(
        "  Hex: {}",
        format!("#{:02x}{:02x}{:02x}", r.round() as u8, g.round() as u8, b.round() as u8).cyan()
    );

    Ok(())
}

async fn segment(client: &FaceCloudClient, file: &Path, output: &Path) -> Result<()> {
    let (name, bytes) = read_image(file)?;
    let png = client.segmented_image(name, bytes).await?;

    fs::write(output, &png).with_context(|| format!("Failed to write {:?}", output))?;

    println!(
        "{} {} ({} bytes)",
        "✓ Segmented image written to".green(),
        output.display().to_string().cyan(),
        png.len()
    );

    Ok(())
}

/// Reads an image file, returning its file name and contents
fn read_image(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read image {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok((name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_image_missing_file() {
        let err = read_image(Path::new("/nonexistent/face.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to read image"));
    }

    #[test]
    fn test_read_image_uses_file_name() {
        let path = std::env::temp_dir().join(format!("facecloud-face-{}.png", std::process::id()));
        fs::write(&path, b"\x89PNG").unwrap();

        let (name, bytes) = read_image(&path).unwrap();
        assert_eq!(name, path.file_name().unwrap().to_string_lossy());
        assert_eq!(bytes, b"\x89PNG");

        let _ = fs::remove_file(&path);
    }
}
