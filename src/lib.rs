use std::{
    any::TypeId,
    cell::RefCell,
    collections::{HashMap, hash_map::Entry},
    ffi::CString,
    fmt::{Debug, Display, Formatter},
    mem::ManuallyDrop,
    ops::Deref,
    ptr::NonNull,
};

use bitflags::bitflags;
use rquickjs_sys::{
    JS_Call, JS_DefineProperty, JS_DefinePropertyValueStr, JS_DupContext, JS_DupValueRT, JS_Eval, JS_EvalThis,
    JS_ExecutePendingJob, JS_FreeContext, JS_FreeCString, JS_FreeRuntime, JS_FreeValueRT, JS_GetClassID, JS_GetException,
    JS_GetGlobalObject, JS_GetOpaque, JS_GetPropertyStr, JS_GetRuntime, JS_GetRuntimeOpaque, JS_IsFunction,
    JS_IsRegisteredClass, JS_MarkValue, JS_NewAtomLen, JS_NewClass, JS_NewClassID, JS_NewContext, JS_NewNumber, JS_NewObject,
    JS_NewObjectClass, JS_NewObjectProto, JS_NewObjectProtoClass, JS_NewRuntime, JS_NewStringLen, JS_RunGC,
    JS_SetConstructorBit, JS_SetOpaque, JS_SetRuntimeOpaque, JS_Throw, JS_ThrowTypeError, JS_ToCStringLen2, JS_ToString,
};

use crate::utils::{
    cstr::MaybeTinyCString,
    global::{Global, GlobalHolder},
    ptr::enforce_not_out_of_memory,
    vec::MaybeTinyVec,
};
pub use crate::{native::*, value::*};

pub mod host;
mod native;
pub mod suite;
mod utils;
mod value;

#[derive(Debug, Copy, Clone)]
pub struct InvalidRuntime;

impl Display for InvalidRuntime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for InvalidRuntime {}

#[derive(Clone)]
pub struct GlobalValue {
    global: Global<rquickjs_sys::JSValue>,
}

impl GlobalValue {
    pub fn to_local<'rt>(&self, rt: &'rt Runtime) -> Result<Value<'rt>, InvalidRuntime> {
        self.global
            .get(Some(rt.rt_ptr))
            .map(|value| unsafe { Value::from_raw(rt, JS_DupValueRT(rt.as_raw().as_ptr(), *value)).unwrap() })
            .ok_or(InvalidRuntime)
    }
}

enum RuntimeStore {
    Running {
        class_ids: RefCell<HashMap<TypeId, u32>>,
        global_refs: RefCell<GlobalHolder<rquickjs_sys::JSValue>>,
    },
    Destroying {
        class_ids: HashMap<TypeId, u32>,
    },
}

pub struct Runtime {
    rt_ptr: NonNull<rquickjs_sys::JSRuntime>,
}

unsafe impl Send for Runtime {}

impl Drop for Runtime {
    fn drop(&mut self) {
        unsafe {
            let store_ptr = &mut *(JS_GetRuntimeOpaque(self.rt_ptr.as_ptr()) as *mut RuntimeStore);

            *store_ptr = RuntimeStore::Destroying {
                class_ids: match store_ptr {
                    RuntimeStore::Running { class_ids, .. } => class_ids.take(),
                    RuntimeStore::Destroying { .. } => {
                        panic!("runtime already destroyed")
                    }
                },
            };

            JS_FreeRuntime(self.rt_ptr.as_ptr());

            let _ = Box::from_raw(store_ptr as *mut RuntimeStore);
        }
    }
}

impl Runtime {
    pub fn new() -> Self {
        let store = RuntimeStore::Running {
            class_ids: RefCell::new(HashMap::new()),
            global_refs: RefCell::new(GlobalHolder::new(|rt, value| unsafe { JS_FreeValueRT(rt.as_ptr(), *value) })),
        };

        unsafe {
            let ptr = enforce_not_out_of_memory(JS_NewRuntime());

            JS_SetRuntimeOpaque(ptr.as_ptr(), Box::into_raw(Box::new(store)) as *mut std::ffi::c_void);

            Self { rt_ptr: ptr }
        }
    }

    pub fn as_raw(&self) -> NonNull<rquickjs_sys::JSRuntime> {
        self.rt_ptr
    }

    fn store(&self) -> &RuntimeStore {
        unsafe {
            let ptr = JS_GetRuntimeOpaque(self.rt_ptr.as_ptr());

            (ptr as *mut RuntimeStore).as_ref().expect("runtime detached")
        }
    }

    pub fn run_gc(&self) {
        unsafe { JS_RunGC(self.rt_ptr.as_ptr()) }
    }

    pub fn new_context(&self) -> Context<'_> {
        let ctx_ptr = unsafe { enforce_not_out_of_memory(JS_NewContext(self.rt_ptr.as_ptr())) };

        Context { rt: self, ptr: ctx_ptr }
    }

    pub fn execute_pending_jobs(&self) {
        unsafe {
            let mut ctx = std::ptr::null_mut();
            while JS_ExecutePendingJob(self.rt_ptr.as_ptr(), &mut ctx) != 0 {
                let _ = ctx; // borrow only
            }
        }
    }

    pub fn new_global_value(&self, value: &Value) -> Result<GlobalValue, InvalidRuntime> {
        if matches!(value.get_runtime(), Some(rt) if rt.rt_ptr != self.rt_ptr) {
            Err(InvalidRuntime)
        } else {
            let g = match self.store() {
                RuntimeStore::Running { global_refs, .. } => global_refs,
                RuntimeStore::Destroying { .. } => panic!("runtime destroying"),
            };

            Ok(GlobalValue {
                global: g.borrow_mut().new_global(self.as_raw(), unsafe {
                    JS_DupValueRT(self.as_raw().as_ptr(), value.as_raw())
                }),
            })
        }
    }

    fn get_or_alloc_class_id<C: Class>(&self) -> rquickjs_sys::JSClassID {
        let store = self.store();

        match store {
            RuntimeStore::Running { class_ids, .. } => match class_ids.borrow_mut().entry(TypeId::of::<C>()) {
                Entry::Occupied(o) => *o.get(),
                Entry::Vacant(v) => {
                    let mut id = 0;
                    unsafe { *v.insert(JS_NewClassID(self.as_raw().as_ptr(), &mut id)) }
                }
            },
            RuntimeStore::Destroying { class_ids } => *class_ids
                .get(&TypeId::of::<C>())
                .expect("register class on runtime destroying"),
        }
    }
}

pub struct Context<'rt> {
    rt: &'rt Runtime,
    ptr: NonNull<rquickjs_sys::JSContext>,
}

impl<'rt> Clone for Context<'rt> {
    fn clone(&self) -> Self {
        Self {
            rt: self.rt,
            ptr: unsafe { enforce_not_out_of_memory(JS_DupContext(self.ptr.as_ptr())) },
        }
    }
}

impl<'rt> Drop for Context<'rt> {
    fn drop(&mut self) {
        // Execute all pending jobs to avoid dangling context pointers in jobs list
        self.rt.execute_pending_jobs();

        unsafe { JS_FreeContext(self.ptr.as_ptr()) }
    }
}

bitflags! {
    #[derive(Copy, Clone, Default)]
    pub struct EvalFlags: u32 {
        const STRICT = rquickjs_sys::JS_EVAL_FLAG_STRICT;
        const COMPILE_ONLY = rquickjs_sys::JS_EVAL_FLAG_COMPILE_ONLY;
        const BACKTRACE_BARRIER = rquickjs_sys::JS_EVAL_FLAG_BACKTRACE_BARRIER;
        const ASYNC = rquickjs_sys::JS_EVAL_FLAG_ASYNC;
    }
}

bitflags! {
    #[derive(Copy, Clone, Default)]
    pub struct PropertyDescriptorFlags: u32 {
        const CONFIGURABLE = rquickjs_sys::JS_PROP_CONFIGURABLE;
        const WRITABLE = rquickjs_sys::JS_PROP_WRITABLE;
        const ENUMERABLE = rquickjs_sys::JS_PROP_ENUMERABLE;
        const LENGTH = rquickjs_sys::JS_PROP_LENGTH;
        const NORMAL = rquickjs_sys::JS_PROP_NORMAL;
        const GETSET = rquickjs_sys::JS_PROP_GETSET;

        const HAS_SHIFT = rquickjs_sys::JS_PROP_HAS_SHIFT;
        const HAS_CONFIGURABLE = rquickjs_sys::JS_PROP_HAS_CONFIGURABLE;
        const HAS_WRITABLE = rquickjs_sys::JS_PROP_HAS_WRITABLE;
        const HAS_ENUMERABLE = rquickjs_sys::JS_PROP_HAS_ENUMERABLE;
        const HAS_GET = rquickjs_sys::JS_PROP_HAS_GET;
        const HAS_SET = rquickjs_sys::JS_PROP_HAS_SET;
        const HAS_VALUE = rquickjs_sys::JS_PROP_HAS_VALUE;

        const THROW = rquickjs_sys::JS_PROP_THROW;
        const THROW_STRICT = rquickjs_sys::JS_PROP_THROW_STRICT;
    }
}

impl<'rt> Context<'rt> {
    pub fn get_runtime(&self) -> &'rt Runtime {
        self.rt
    }

    pub fn as_raw(&self) -> NonNull<rquickjs_sys::JSContext> {
        self.ptr
    }

    #[inline]
    fn enforce_value_in_same_runtime(&self, value: &Value) {
        match value.get_runtime() {
            None => {}
            Some(rt) => {
                assert_eq!(rt.rt_ptr, self.rt.rt_ptr, "supplied value not in same runtime")
            }
        }
    }

    #[inline]
    fn enforce_atom_in_same_runtime(&self, value: &Atom) {
        assert_eq!(
            value.get_runtime().rt_ptr,
            self.rt.rt_ptr,
            "supplied atom not in same runtime"
        )
    }

    fn new_c_string<const TINY_CAP: usize>(&self, s: impl AsRef<str>) -> Result<MaybeTinyCString<TINY_CAP>, Exception> {
        MaybeTinyCString::new(s.as_ref().as_bytes()).map_err(|pos| {
            let desc = MaybeTinyCString::<64>::new(format!("convert string: {}", pos).as_bytes()).unwrap();

            unsafe { JS_ThrowTypeError(self.ptr.as_ptr(), (*desc).as_ptr()) };

            Exception
        })
    }

    fn catch(&self) -> Option<Value<'rt>> {
        unsafe {
            match Value::from_raw(self.rt, JS_GetException(self.ptr.as_ptr())).ok()? {
                Value::Null => None,
                Value::Undefined => None,
                Value::Uninitialized => None,
                v => Some(v),
            }
        }
    }

    #[inline]
    fn try_catch<R>(&self, f: impl FnOnce() -> Result<R, Exception>) -> Result<R, Value<'rt>> {
        match f() {
            Ok(ret) => Ok(ret),
            Err(_) => Err(self.catch().expect("unexpected return value from quickjs")),
        }
    }

    fn eval(
        &self,
        this: Option<&Value>,
        code: impl AsRef<str>,
        filename: impl AsRef<str>,
        flags: u32,
    ) -> Result<Value<'rt>, Value<'rt>> {
        self.try_catch(|| unsafe {
            let code = self.new_c_string::<256>(code)?;
            let filename = self.new_c_string::<64>(filename)?;

            let ret = if let Some(this) = this {
                JS_EvalThis(
                    self.ptr.as_ptr(),
                    this.as_raw(),
                    code.as_ptr(),
                    code.count_bytes() as _,
                    filename.as_ptr(),
                    flags as _,
                )
            } else {
                JS_Eval(
                    self.ptr.as_ptr(),
                    code.as_ptr(),
                    code.count_bytes() as _,
                    filename.as_ptr(),
                    flags as _,
                )
            };

            Value::from_raw(self.rt, ret)
        })
    }

    pub fn eval_global(
        &self,
        this: Option<&Value>,
        code: impl AsRef<str>,
        filename: impl AsRef<str>,
        flags: EvalFlags,
    ) -> Result<Value<'rt>, Value<'rt>> {
        self.eval(this, code, filename, flags.bits() | rquickjs_sys::JS_EVAL_TYPE_GLOBAL)
    }

    pub fn new_number(&self, v: f64) -> Value<'rt> {
        unsafe { Value::from_raw(self.rt, JS_NewNumber(self.ptr.as_ptr(), v)).unwrap() }
    }

    pub fn is_function(&self, value: &Value) -> bool {
        self.enforce_value_in_same_runtime(value);

        unsafe { JS_IsFunction(self.ptr.as_ptr(), value.as_raw()) }
    }

    pub fn new_string(&self, s: impl AsRef<str>) -> Result<Value<'rt>, Value<'rt>> {
        self.try_catch(|| unsafe {
            let s = s.as_ref();

            Value::from_raw(self.rt, JS_NewStringLen(self.ptr.as_ptr(), s.as_ptr() as _, s.len() as _))
        })
    }

    pub fn get_string<'v>(&'v self, v: &'v Value) -> Result<JSStr<'v>, Value<'rt>> {
        self.enforce_value_in_same_runtime(v);

        unsafe {
            let mut length = 0;

            let ptr = JS_ToCStringLen2(self.ptr.as_ptr(), &mut length, v.as_raw(), false);
            if ptr.is_null() {
                return Err(self.catch().unwrap());
            }

            Ok(JSStr {
                ctx: self,
                ptr,
                len: length as _,
            })
        }
    }

    pub fn to_string(&self, value: &Value) -> Result<Value<'rt>, Value<'rt>> {
        self.enforce_value_in_same_runtime(value);

        self.try_catch(|| unsafe { Value::from_raw(self.rt, JS_ToString(self.ptr.as_ptr(), value.as_raw())) })
    }

    pub fn new_atom(&self, s: impl AsRef<str>) -> Result<Atom<'rt>, Value<'rt>> {
        unsafe {
            let s = s.as_ref();

            let atom = JS_NewAtomLen(self.ptr.as_ptr(), s.as_ptr() as _, s.len() as _);

            if atom == rquickjs_sys::JS_ATOM_NULL {
                Err(self.catch().unwrap())
            } else {
                Ok(Atom::from_raw(self.rt, atom))
            }
        }
    }

    fn get_or_register_class<C: Class>(&self) -> rquickjs_sys::JSClassID {
        let class_id = self.rt.get_or_alloc_class_id::<C>();

        unsafe {
            if !JS_IsRegisteredClass(self.rt.as_raw().as_ptr(), class_id) {
                let name = CString::new(C::NAME).expect("invalid class name");

                let def = rquickjs_sys::JSClassDef {
                    class_name: name.as_ptr(),
                    finalizer: {
                        unsafe extern "C" fn finalizer<C: Class>(rt: *mut rquickjs_sys::JSRuntime, val: rquickjs_sys::JSValue) {
                            unsafe {
                                let rt = ManuallyDrop::new(Runtime {
                                    rt_ptr: NonNull::new(rt).unwrap(),
                                });

                                let ptr = JS_GetOpaque(val, rt.get_or_alloc_class_id::<C>());
                                if !ptr.is_null() {
                                    drop(Box::from_raw(ptr as *mut C))
                                }
                                JS_SetOpaque(val, std::ptr::null_mut());
                            }
                        }

                        Some(finalizer::<C>)
                    },
                    gc_mark: {
                        unsafe extern "C" fn gc_mark<C: Class>(
                            rt: *mut rquickjs_sys::JSRuntime,
                            val: rquickjs_sys::JSValue,
                            mark_func: rquickjs_sys::JS_MarkFunc,
                        ) {
                            struct Marker {
                                rt: NonNull<rquickjs_sys::JSRuntime>,
                                mark_func: rquickjs_sys::JS_MarkFunc,
                            }

                            impl GCMarker for Marker {
                                fn mark_value(&self, value: &Value) {
                                    unsafe { JS_MarkValue(self.rt.as_ptr(), value.as_raw(), self.mark_func) }
                                }

                                fn mark_global_value(&self, value: &GlobalValue) {
                                    if let Some(v) = value.global.get(None) {
                                        unsafe { JS_MarkValue(self.rt.as_ptr(), *v, self.mark_func) }
                                    }
                                }
                            }

                            let rt = ManuallyDrop::new(Runtime {
                                rt_ptr: NonNull::new(rt).unwrap(),
                            });

                            unsafe {
                                let ptr = JS_GetOpaque(val, rt.get_or_alloc_class_id::<C>()) as *const C;
                                if !ptr.is_null() {
                                    (*ptr).gc_mark(&Marker {
                                        rt: rt.as_raw(),
                                        mark_func,
                                    })
                                }
                            }
                        }

                        Some(gc_mark::<C>)
                    },
                    call: {
                        unsafe extern "C" fn call<C: Class>(
                            ctx: *mut rquickjs_sys::JSContext,
                            func_obj: rquickjs_sys::JSValue,
                            this_val: rquickjs_sys::JSValue,
                            argc: std::ffi::c_int,
                            argv: *mut rquickjs_sys::JSValue,
                            flags: std::ffi::c_int,
                        ) -> rquickjs_sys::JSValue {
                            unsafe {
                                let rt = ManuallyDrop::new(Runtime {
                                    rt_ptr: NonNull::new(JS_GetRuntime(ctx)).unwrap(),
                                });
                                let ctx = ManuallyDrop::new(Context {
                                    rt: &rt,
                                    ptr: NonNull::new(ctx).unwrap(),
                                });

                                let data = JS_GetOpaque(func_obj, JS_GetClassID(func_obj)) as *mut C;
                                if data.is_null() {
                                    return JS_ThrowTypeError(ctx.ptr.as_ptr(), c"native payload detached".as_ptr());
                                }

                                let func = ManuallyDrop::new(Value::from_raw(&rt, func_obj).unwrap());
                                let this = ManuallyDrop::new(Value::from_raw(&rt, this_val).unwrap());
                                let args = (0..argc)
                                    .map(|v| ManuallyDrop::new(Value::from_raw(&rt, argv.offset(v as _).read()).unwrap()))
                                    .collect::<MaybeTinyVec<_, 16>>();
                                let options = CallOptions {
                                    constructor: (flags as u32) & rquickjs_sys::JS_CALL_FLAG_CONSTRUCTOR > 0,
                                };

                                match (*data).call(
                                    &ctx,
                                    &func,
                                    &this,
                                    std::slice::from_raw_parts(args.as_ptr() as _, args.len()),
                                    options,
                                ) {
                                    Ok(v) => v.into_raw(),
                                    Err(err) => JS_Throw(ctx.ptr.as_ptr(), err.into_raw()),
                                }
                            }
                        }

                        Some(call::<C>)
                    },
                    exotic: std::ptr::null_mut(),
                };

                if JS_NewClass(self.rt.as_raw().as_ptr(), class_id, &def) != 0 {
                    panic!("out of memory")
                }

                C::on_registered(self.rt);
            }

            class_id
        }
    }

    pub fn new_object(&self, proto: Option<&Value>) -> Result<Value<'rt>, Value<'rt>> {
        if let Some(obj) = proto {
            self.enforce_value_in_same_runtime(obj);
        }

        self.try_catch(|| unsafe {
            let value = match proto {
                None => JS_NewObject(self.ptr.as_ptr()),
                Some(p) => JS_NewObjectProto(self.ptr.as_ptr(), p.as_raw()),
            };

            Value::from_raw(self.rt, value)
        })
    }

    pub fn new_object_class<C: Class>(&self, class: C, proto: Option<&Value>) -> Result<Value<'rt>, Value<'rt>> {
        if let Some(obj) = proto {
            self.enforce_value_in_same_runtime(obj);
        }

        self.try_catch(|| unsafe {
            let class_id = self.get_or_register_class::<C>();

            let value = match proto {
                None => JS_NewObjectClass(self.ptr.as_ptr(), class_id as _),
                Some(p) => JS_NewObjectProtoClass(self.ptr.as_ptr(), p.as_raw(), class_id as _),
            };

            JS_SetOpaque(value, Box::into_raw(Box::new(class)) as *mut std::ffi::c_void);

            Value::from_raw(self.rt, value)
        })
    }

    pub fn get_class_opaque<C: Class>(&self, value: &Value) -> Option<&C> {
        self.enforce_value_in_same_runtime(value);

        unsafe {
            let class_id = self.rt.get_or_alloc_class_id::<C>();

            (JS_GetOpaque(value.as_raw(), class_id) as *const C).as_ref()
        }
    }

    /// Detaches and returns the native payload, leaving the JS object alive
    /// but empty. The class finalizer skips an already-detached payload.
    pub fn take_class_opaque<C: Class>(&self, value: &Value) -> Option<Box<C>> {
        self.enforce_value_in_same_runtime(value);

        unsafe {
            let class_id = self.rt.get_or_alloc_class_id::<C>();

            let ptr = JS_GetOpaque(value.as_raw(), class_id);
            if ptr.is_null() {
                None
            } else {
                JS_SetOpaque(value.as_raw(), std::ptr::null_mut());

                Some(Box::from_raw(ptr as *mut C))
            }
        }
    }

    pub fn set_constructor_bit(&self, value: &Value, is_constructor: bool) -> bool {
        self.enforce_value_in_same_runtime(value);

        unsafe { JS_SetConstructorBit(self.ptr.as_ptr(), value.as_raw(), is_constructor) }
    }

    pub fn get_property_str(&self, obj: &Value, prop: impl AsRef<str>) -> Result<Value<'rt>, Value<'rt>> {
        self.enforce_value_in_same_runtime(obj);

        self.try_catch(|| unsafe {
            let prop = self.new_c_string::<64>(prop)?;

            let value = JS_GetPropertyStr(self.ptr.as_ptr(), obj.as_raw(), prop.as_ptr());
            Value::from_raw(self.rt, value)
        })
    }

    pub fn define_property(
        &self,
        this_obj: &Value,
        prop: &Atom,
        value: &Value,
        getter: &Value,
        setter: &Value,
        flags: PropertyDescriptorFlags,
    ) -> Result<bool, Value<'rt>> {
        self.enforce_value_in_same_runtime(this_obj);
        self.enforce_atom_in_same_runtime(prop);
        self.enforce_value_in_same_runtime(value);
        self.enforce_value_in_same_runtime(getter);
        self.enforce_value_in_same_runtime(setter);

        self.try_catch(|| unsafe {
            let ret = JS_DefineProperty(
                self.ptr.as_ptr(),
                this_obj.as_raw(),
                prop.as_raw(),
                value.as_raw(),
                getter.as_raw(),
                setter.as_raw(),
                flags.bits() as _,
            );
            if ret < 0 { Err(Exception) } else { Ok(ret != 0) }
        })
    }

    pub fn define_property_value_str(
        &self,
        this_obj: &Value,
        prop: &str,
        value: Value,
        flags: PropertyDescriptorFlags,
    ) -> Result<bool, Value<'rt>> {
        self.enforce_value_in_same_runtime(this_obj);
        self.enforce_value_in_same_runtime(&value);

        self.try_catch(|| unsafe {
            let prop = self.new_c_string::<16>(prop)?;
            let ret = JS_DefinePropertyValueStr(
                self.ptr.as_ptr(),
                this_obj.as_raw(),
                prop.as_ptr(),
                value.into_raw(),
                flags.bits() as _,
            );
            if ret < 0 { Err(Exception) } else { Ok(ret != 0) }
        })
    }

    fn convert_value_to_raw_value<const TINY_CAP: usize>(&self, args: &[Value]) -> MaybeTinyVec<rquickjs_sys::JSValue, TINY_CAP> {
        args.iter()
            .map(|v| {
                self.enforce_value_in_same_runtime(v);

                v.as_raw()
            })
            .collect()
    }

    pub fn call(&self, func: &Value, this: &Value, args: &[Value]) -> Result<Value<'rt>, Value<'rt>> {
        self.enforce_value_in_same_runtime(func);
        self.enforce_value_in_same_runtime(this);

        let args = self.convert_value_to_raw_value::<16>(args);

        self.try_catch(|| unsafe {
            let value = JS_Call(
                self.ptr.as_ptr(),
                func.as_raw(),
                this.as_raw(),
                args.len() as _,
                args.as_ptr().cast_mut(),
            );
            Value::from_raw(self.rt, value)
        })
    }

    pub fn get_global_object(&self) -> Value<'rt> {
        unsafe { Value::from_raw(self.rt, JS_GetGlobalObject(self.ptr.as_ptr())).unwrap() }
    }
}

/// Renders a thrown value as text for logs and error types. Falls back when
/// stringification itself throws.
pub fn describe_exception(ctx: &Context, value: &Value) -> std::string::String {
    let printable = ctx.to_string(value).ok();
    let text = match &printable {
        Some(v) => ctx.get_string(v).ok(),
        None => None,
    };

    match text {
        Some(s) => s.to_string(),
        None => "<unprintable exception>".to_string(),
    }
}

pub struct JSStr<'v> {
    ctx: &'v Context<'v>,
    ptr: *const std::ffi::c_char,
    len: usize,
}

impl<'v> Drop for JSStr<'v> {
    fn drop(&mut self) {
        unsafe { JS_FreeCString(self.ctx.ptr.as_ptr(), self.ptr) }
    }
}

impl<'v> Deref for JSStr<'v> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        unsafe { std::str::from_utf8_unchecked(std::slice::from_raw_parts(self.ptr as _, self.len)) }
    }
}
