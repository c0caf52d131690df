use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::error::PicResult;
use crate::model::Contact;
use crate::picture::{self, ImageCodec};
use crate::providers::PictureProvider;
use crate::store::ContactStore;

/// Cache file for a contact: `<dir>/<first>_<last>.jpg`, lowercased.
pub fn picture_cache_path(picture_dir: &Path, contact: &Contact) -> PathBuf {
    picture_dir.join(format!(
        "{}_{}.jpg",
        cache_key_part(&contact.first_name),
        cache_key_part(&contact.last_name)
    ))
}

fn cache_key_part(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(['/', '\\'], "-")
}

/// Make sure an image for `contact` sits at `output_path`.
///
/// Returns `true` when that file should be applied to the contact. A contact
/// that already has a picture is never touched: its bytes are written out and
/// `false` is returned. An existing cache file is reused without asking any
/// provider. Otherwise providers are tried in order until one succeeds.
pub fn find_picture<P>(
    contact: &mut Contact,
    output_path: &Path,
    providers: &mut [P],
) -> PicResult<bool>
where
    P: PictureProvider,
{
    if let Some(existing) = contact.picture() {
        ensure_parent_dir(output_path)?;
        fs::write(output_path, existing)?;
        debug!("{} already has a picture", contact.display_name());
        return Ok(false);
    }

    if output_path.exists() {
        debug!("Using cached {}", output_path.display());
        return Ok(true);
    }

    ensure_parent_dir(output_path)?;
    for provider in providers.iter_mut() {
        match provider.get_image(contact, output_path) {
            Ok(true) => {
                debug!("{} found a picture for {}", provider.kind(), contact.display_name());
                return Ok(true);
            }
            Ok(false) => debug!("{} has no picture for {}", provider.kind(), contact.display_name()),
            Err(e) => error!("{} failed for {}: {}", provider.kind(), contact.display_name(), e),
        }
    }

    Ok(false)
}

/// Normalize the image at `file_path` and install it as the contact's
/// picture. Returns whatever the store reports.
pub fn apply_picture<S, C>(
    store: &mut S,
    codec: &C,
    contact: &mut Contact,
    file_path: &Path,
) -> PicResult<bool>
where
    S: ContactStore + ?Sized,
    C: ImageCodec + ?Sized,
{
    let bytes = fs::read(file_path)?;
    let source = codec.decode(&bytes, &file_path.display().to_string())?;
    let normalized = picture::normalize(&source, file_path)?;
    let encoded = codec.encode(&normalized.image)?;
    store.set_picture(contact, encoded)
}

fn ensure_parent_dir(path: &Path) -> PicResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
